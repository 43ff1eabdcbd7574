//! Diff engine errors.

/// Structural problems in a supplied ChangeSet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DiffErrorKind {
    /// keep + remove segments do not reconstruct the old text
    #[display("ChangeSet does not reconstruct the original text ({} chars expected, {} found)", expected, found)]
    OldTextMismatch {
        /// Character count of the original text
        expected: usize,
        /// Character count reconstructed from the ChangeSet
        found: usize,
    },
    /// keep + add segments do not reconstruct the new text
    #[display("ChangeSet does not reconstruct the edited text ({} chars expected, {} found)", expected, found)]
    NewTextMismatch {
        /// Character count of the edited text
        expected: usize,
        /// Character count reconstructed from the ChangeSet
        found: usize,
    },
}

/// Diff error with source location.
///
/// # Examples
///
/// ```
/// use draftsmith_error::{DiffError, DiffErrorKind};
///
/// let err = DiffError::new(DiffErrorKind::OldTextMismatch { expected: 5, found: 3 });
/// assert!(err.to_string().contains("original text"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Diff Error: {} at line {} in {}", kind, line, file)]
pub struct DiffError {
    /// The specific error condition
    pub kind: DiffErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl DiffError {
    /// Create a new DiffError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DiffErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
