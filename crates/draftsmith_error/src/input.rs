//! Caller input validation errors.

/// Caller-side input problems. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum InputErrorKind {
    /// A required field is missing or blank
    #[display("Missing required field: {}", _0)]
    MissingField(String),
    /// URL is not an absolute http(s) URL
    #[display("Invalid URL: {}", _0)]
    InvalidUrl(String),
    /// Input type is neither "topic" nor "url"
    #[display("Unsupported input type: {}", _0)]
    UnsupportedInputType(String),
    /// Any other malformed request body
    #[display("Invalid input: {}", _0)]
    Invalid(String),
}

/// Input error with source location.
///
/// # Examples
///
/// ```
/// use draftsmith_error::{InputError, InputErrorKind};
///
/// let err = InputError::new(InputErrorKind::InvalidUrl("not a url".into()));
/// assert!(err.to_string().contains("not a url"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Input Error: {} at line {} in {}", kind, line, file)]
pub struct InputError {
    /// The specific error condition
    pub kind: InputErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl InputError {
    /// Create a new InputError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: InputErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
