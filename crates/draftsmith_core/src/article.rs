//! Article references and LLM-produced article metadata.

use draftsmith_error::{InputError, InputErrorKind};
use serde::{Deserialize, Serialize};

/// Author placeholder for articles synthesized from a bare URL.
const SYNTHETIC_AUTHOR: &str = "Unknown author";
/// Publication placeholder for articles synthesized from a bare URL.
const SYNTHETIC_PUBLICATION: &str = "Web";

/// An article a post can be drafted from.
///
/// # Examples
///
/// ```
/// use draftsmith_core::ArticleRefBuilder;
///
/// let article = ArticleRefBuilder::default()
///     .id("a1")
///     .title("Rust 2024 ships")
///     .summary("The new edition is out.")
///     .source_url("https://blog.rust-lang.org")
///     .build()
///     .unwrap();
///
/// assert!(article.validate().is_ok());
/// assert!(article.image_url.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_builder::Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct ArticleRef {
    /// Stable identifier
    pub id: String,
    /// Headline
    pub title: String,
    /// Short summary used as drafting context
    pub summary: String,
    /// Where the article lives
    pub source_url: String,
    /// Byline, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub author: Option<String>,
    /// Outlet name, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub publication: Option<String>,
    /// Lead image, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub image_url: Option<String>,
}

impl ArticleRef {
    /// Check that id, title, summary and source URL are all present.
    ///
    /// # Errors
    ///
    /// Returns the first blank field as [`InputErrorKind::MissingField`].
    pub fn validate(&self) -> Result<(), InputError> {
        let required = [
            ("article.id", &self.id),
            ("article.title", &self.title),
            ("article.summary", &self.summary),
            ("article.sourceUrl", &self.source_url),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(InputError::new(InputErrorKind::MissingField(name.to_string())));
            }
        }
        Ok(())
    }

    /// Build the synthetic article used when drafting from a bare URL.
    ///
    /// Author and publication are fixed placeholders and there is never an image.
    pub fn from_url_summary(url: &str, summary: &ArticleSummary) -> Self {
        Self {
            id: format!("url:{}", url),
            title: summary.title.clone(),
            summary: summary.summary.clone(),
            source_url: url.to_string(),
            author: Some(SYNTHETIC_AUTHOR.to_string()),
            publication: Some(SYNTHETIC_PUBLICATION.to_string()),
            image_url: None,
        }
    }
}

/// `{title, summary}` produced by URL summarization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleSummary {
    /// Article headline
    pub title: String,
    /// Article summary
    pub summary: String,
}

impl ArticleSummary {
    /// Both fields carry non-whitespace text.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.summary.trim().is_empty()
    }
}

/// A topic proposed for an industry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicSuggestion {
    /// Short topic name
    pub label: String,
    /// One-sentence explanation
    #[serde(default)]
    pub description: String,
}

/// Validate that `url` is an absolute http(s) URL with a host.
///
/// # Examples
///
/// ```
/// use draftsmith_core::validate_url;
///
/// assert!(validate_url("https://example.com/post").is_ok());
/// assert!(validate_url("not a url").is_err());
/// assert!(validate_url("ftp://example.com").is_err());
/// ```
pub fn validate_url(url: &str) -> Result<reqwest::Url, InputError> {
    let parsed = reqwest::Url::parse(url.trim())
        .map_err(|e| InputError::new(InputErrorKind::InvalidUrl(format!("{}: {}", url, e))))?;

    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some_and(|h| !h.is_empty()) => Ok(parsed),
        _ => Err(InputError::new(InputErrorKind::InvalidUrl(url.to_string()))),
    }
}
