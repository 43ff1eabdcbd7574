//! JSON path: literal fence stripping, parsing and stage shapes.

use draftsmith_core::{ArticleRef, ArticleRefBuilder, validate_url};
use draftsmith_error::{ExtractionError, InputError, InputErrorKind, Stage};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Strip one leading and one trailing code-fence marker, then trim.
///
/// Only the literal markers "```json", "```JSON" and "```" are recognised; this
/// is not a markdown parser.
///
/// # Examples
///
/// ```
/// use draftsmith_pipeline::strip_fences;
///
/// assert_eq!(strip_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(strip_fences("  {\"a\": 1}  "), "{\"a\": 1}");
/// ```
pub fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    for marker in ["```json", "```JSON", "```"] {
        if let Some(rest) = text.strip_prefix(marker) {
            text = rest;
            break;
        }
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Fence-strip and parse `raw` as a JSON object.
///
/// # Errors
///
/// `MalformedPayload` tagged with `stage` when the text is not a JSON object.
pub fn parse_json_object(raw: &str, stage: Stage) -> Result<Map<String, Value>, ExtractionError> {
    match serde_json::from_str::<Value>(strip_fences(raw)) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(other) => {
            tracing::debug!(kind = json_kind(&other), %stage, "Reply is JSON but not an object");
            Err(ExtractionError::malformed(stage, raw))
        }
        Err(e) => {
            tracing::debug!(error = %e, %stage, "Reply is not JSON");
            Err(ExtractionError::malformed(stage, raw))
        }
    }
}

/// Parse a fenced or bare JSON object straight into a shape type.
pub(crate) fn parse_shape<T: DeserializeOwned>(raw: &str, stage: Stage) -> Result<T, ExtractionError> {
    let object = parse_json_object(raw, stage)?;
    serde_json::from_value(Value::Object(object)).map_err(|e| {
        tracing::debug!(error = %e, %stage, "Reply lacks the expected keys");
        ExtractionError::malformed(stage, raw)
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopicsPayload {
    pub topics: Vec<TopicEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopicEntry {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArticlesPayload {
    pub articles: Vec<ArticleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ArticleEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub publication: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl ArticleEntry {
    /// Validated article with a placeholder id; the caller numbers kept entries.
    pub fn into_article(self) -> Result<ArticleRef, InputError> {
        let url = validate_url(&self.url)?;
        let article = ArticleRefBuilder::default()
            .id("pending")
            .title(self.title.trim())
            .summary(self.summary.trim())
            .source_url(url.to_string())
            .publication(self.publication.filter(|p| !p.trim().is_empty()))
            .author(self.author.filter(|a| !a.trim().is_empty()))
            .build()
            .map_err(|e| InputError::new(InputErrorKind::Invalid(e.to_string())))?;
        article.validate()?;
        Ok(article)
    }
}
