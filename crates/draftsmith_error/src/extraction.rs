//! Response extraction error types.

use crate::Stage;

/// Ways an untrusted LLM response can fail to yield the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ExtractionErrorKind {
    /// Payload was not JSON, or lacked a required key
    #[display("Malformed upstream payload during {}: {}", stage, snippet)]
    MalformedPayload {
        /// Stage whose response was being parsed
        stage: Stage,
        /// Leading slice of the raw response
        snippet: String,
    },
    /// Neither JSON nor free-text parsing produced a usable post
    #[display("No extractable posts in response")]
    NoExtractablePosts,
    /// Topic response contained no usable topics
    #[display("No extractable topics in response")]
    NoExtractableTopics,
    /// Article search response contained no usable articles
    #[display("No extractable articles in response")]
    NoExtractableArticles,
    /// URL summary lacked a title or summary
    #[display("Invalid summary format: {}", _0)]
    InvalidSummaryFormat(String),
    /// Edit endpoint returned no replacement text
    #[display("Edit returned no replacement text")]
    EmptyEditResult,
}

/// Extraction error with source location.
///
/// # Examples
///
/// ```
/// use draftsmith_error::{ExtractionError, ExtractionErrorKind};
///
/// let err = ExtractionError::new(ExtractionErrorKind::NoExtractablePosts);
/// assert!(err.to_string().contains("No extractable posts"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Extraction Error: {} at line {} in {}", kind, line, file)]
pub struct ExtractionError {
    /// The specific error condition
    pub kind: ExtractionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ExtractionError {
    /// Create a new ExtractionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExtractionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Build a malformed-payload error keeping at most 200 characters of the raw text.
    #[track_caller]
    pub fn malformed(stage: Stage, raw: &str) -> Self {
        let snippet: String = raw.chars().take(200).collect();
        Self::new(ExtractionErrorKind::MalformedPayload { stage, snippet })
    }
}
