//! Prompt template store errors.

/// Failures while fetching templates from the external template store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PromptStoreErrorKind {
    /// Transport-level failure
    #[display("Template store request failed: {}", _0)]
    Request(String),
    /// Store answered with a non-success status
    #[display("Template store returned HTTP {} for '{}'", status, key)]
    Status {
        /// HTTP status code
        status: u16,
        /// Template key requested
        key: String,
    },
    /// Template document could not be decoded
    #[display("Failed to decode template: {}", _0)]
    Decode(String),
    /// A role required for a complete set is absent
    #[display("Template '{}' missing from store", _0)]
    MissingTemplate(String),
    /// Local template file could not be read
    #[display("Failed to read template file: {}", _0)]
    Io(String),
}

/// Prompt store error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Prompt Store Error: {} at line {} in {}", kind, line, file)]
pub struct PromptStoreError {
    /// The specific error condition
    pub kind: PromptStoreErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl PromptStoreError {
    /// Create a new PromptStoreError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PromptStoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
