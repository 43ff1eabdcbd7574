//! Top-level error wrapper types.

use crate::{
    ConfigError, DiffError, ExtractionError, ExtractionErrorKind, GatewayError, HttpError,
    InputError, JsonError, PromptStoreError, Stage,
};

/// Every failure the Draftsmith crates can surface.
///
/// # Examples
///
/// ```
/// use draftsmith_error::{DraftsmithError, InputError, InputErrorKind};
///
/// let err: DraftsmithError = InputError::new(InputErrorKind::MissingField("url".into())).into();
/// assert!(format!("{}", err).contains("Input Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum DraftsmithErrorKind {
    /// Missing or invalid configuration
    #[from(ConfigError)]
    Config(ConfigError),
    /// LLM provider failure
    #[from(GatewayError)]
    Gateway(GatewayError),
    /// Untrusted response could not be parsed into the expected shape
    #[from(ExtractionError)]
    Extraction(ExtractionError),
    /// Caller supplied invalid input
    #[from(InputError)]
    Input(InputError),
    /// Prompt template store failure
    #[from(PromptStoreError)]
    PromptStore(PromptStoreError),
    /// Malformed diff metadata
    #[from(DiffError)]
    Diff(DiffError),
    /// HTTP transport error outside the LLM gateway
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Draftsmith error with kind discrimination and an optional stage tag.
///
/// # Examples
///
/// ```
/// use draftsmith_error::{DraftsmithResult, ConfigError, Stage};
///
/// fn might_fail() -> DraftsmithResult<()> {
///     Err(ConfigError::new("proxy.base_url is not set"))?
/// }
///
/// let err = might_fail().map_err(|e| e.at_stage(Stage::Edit)).unwrap_err();
/// assert!(err.to_string().starts_with("Draftsmith Error [edit]"));
/// ```
#[derive(Debug, derive_more::Error)]
pub struct DraftsmithError {
    #[error(source)]
    kind: Box<DraftsmithErrorKind>,
    stage: Option<Stage>,
}

impl DraftsmithError {
    /// Create a new error from a kind.
    pub fn new(kind: DraftsmithErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
            stage: None,
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DraftsmithErrorKind {
        &self.kind
    }

    /// Stage that produced the error, if tagged.
    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    /// Tag the error with a stage. An existing tag is kept.
    pub fn at_stage(mut self, stage: Stage) -> Self {
        if self.stage.is_none() {
            self.stage = Some(stage);
        }
        self
    }

    /// Whether the caller is at fault (maps to HTTP 400).
    pub fn is_client_error(&self) -> bool {
        matches!(*self.kind, DraftsmithErrorKind::Input(_))
    }

    /// Whether this is the one failure the pipeline degrades on.
    pub fn is_malformed_payload(&self) -> bool {
        matches!(
            &*self.kind,
            DraftsmithErrorKind::Extraction(ExtractionError {
                kind: ExtractionErrorKind::MalformedPayload { .. },
                ..
            })
        )
    }
}

impl std::fmt::Display for DraftsmithError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.stage {
            Some(stage) => write!(f, "Draftsmith Error [{}]: {}", stage, self.kind),
            None => write!(f, "Draftsmith Error: {}", self.kind),
        }
    }
}

// Generic From implementation for any type that converts to DraftsmithErrorKind
impl<T> From<T> for DraftsmithError
where
    T: Into<DraftsmithErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Draftsmith operations.
pub type DraftsmithResult<T> = std::result::Result<T, DraftsmithError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GatewayErrorKind, InputErrorKind};

    #[test]
    fn test_first_stage_tag_wins() {
        let err: DraftsmithError = GatewayError::new(GatewayErrorKind::EmptyResponse).into();
        let err = err.at_stage(Stage::UrlSummary).at_stage(Stage::PostGeneration);
        assert_eq!(err.stage(), Some(Stage::UrlSummary));
    }

    #[test]
    fn test_classification() {
        let input: DraftsmithError =
            InputError::new(InputErrorKind::InvalidUrl("nope".into())).into();
        assert!(input.is_client_error());
        assert!(!input.is_malformed_payload());

        let malformed: DraftsmithError =
            ExtractionError::malformed(Stage::PostGeneration, "not json").into();
        assert!(malformed.is_malformed_payload());
        assert!(!malformed.is_client_error());
    }

    #[test]
    fn test_malformed_snippet_is_bounded() {
        let raw = "x".repeat(1_000);
        let err = ExtractionError::malformed(Stage::UrlSummary, &raw);
        match err.kind {
            ExtractionErrorKind::MalformedPayload { snippet, .. } => assert_eq!(snippet.len(), 200),
            other => panic!("unexpected kind: {other}"),
        }
    }
}
