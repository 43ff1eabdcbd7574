//! Generation requests.

use crate::{ArticleRef, validate_url};
use draftsmith_error::InputError;
use serde::{Deserialize, Serialize};

/// What to draft posts from.
///
/// # Examples
///
/// ```
/// use draftsmith_core::GenerationRequest;
///
/// let request = GenerationRequest::Url {
///     url: "not a url".to_string(),
///     industry: "Tech".to_string(),
///     topic_label: "AI".to_string(),
/// };
/// assert!(request.validate().is_err());
/// assert_eq!(request.kind_name(), "url");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GenerationRequest {
    /// Draft from a selected article
    Topic {
        /// The article to write about
        article: ArticleRef,
        /// Audience industry
        industry: String,
        /// Topic the article was found under
        #[serde(rename = "topicLabel")]
        topic_label: String,
    },
    /// Summarize an arbitrary URL first, then draft
    Url {
        /// Absolute http(s) URL
        url: String,
        /// Audience industry
        industry: String,
        /// Topic label supplied by the caller
        #[serde(rename = "topicLabel")]
        topic_label: String,
    },
}

impl GenerationRequest {
    /// Validate the article fields or the URL, depending on the kind.
    pub fn validate(&self) -> Result<(), InputError> {
        match self {
            Self::Topic { article, .. } => article.validate(),
            Self::Url { url, .. } => validate_url(url).map(|_| ()),
        }
    }

    /// `"topic"` or `"url"`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Topic { .. } => "topic",
            Self::Url { .. } => "url",
        }
    }

    /// Audience industry.
    pub fn industry(&self) -> &str {
        match self {
            Self::Topic { industry, .. } | Self::Url { industry, .. } => industry,
        }
    }

    /// Topic label.
    pub fn topic_label(&self) -> &str {
        match self {
            Self::Topic { topic_label, .. } | Self::Url { topic_label, .. } => topic_label,
        }
    }
}
