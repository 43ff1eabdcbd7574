//! LLM gateway error types.

/// Failure conditions of a single outbound chat-completion call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GatewayErrorKind {
    /// Provider cannot be reached or is not configured (e.g. missing API key)
    #[display("Upstream unavailable: {}", _0)]
    Unavailable(String),
    /// Provider answered with a non-success HTTP status
    #[display("Upstream returned HTTP {}: {}", status, body)]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body captured for diagnostics
        body: String,
    },
    /// Success response carried no extractable message content
    #[display("Upstream returned no message content")]
    EmptyResponse,
}

/// Gateway error with source location.
///
/// # Examples
///
/// ```
/// use draftsmith_error::{GatewayError, GatewayErrorKind};
///
/// let err = GatewayError::new(GatewayErrorKind::Http { status: 502, body: "bad gateway".into() });
/// assert!(err.to_string().contains("502"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gateway Error: {} at line {} in {}", kind, line, file)]
pub struct GatewayError {
    /// The specific error condition
    pub kind: GatewayErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl GatewayError {
    /// Create a new GatewayError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GatewayErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
