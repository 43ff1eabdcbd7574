//! ChangeSet validation.

use draftsmith_core::ChangeSet;
use draftsmith_error::{DiffError, DiffErrorKind};

/// Check that `changes` describes exactly `old -> new`.
///
/// `keep`+`remove` segments must reconstruct `old` and `keep`+`add` segments
/// must reconstruct `new`. A change set that fails is never animated.
///
/// # Examples
///
/// ```
/// use draftsmith_core::{Change, ChangeSet};
/// use draftsmith_diff::validate;
///
/// let changes = ChangeSet::new(vec![Change::keep("Hello"), Change::add(" world")]);
/// assert!(validate(&changes, "Hello", "Hello world").is_ok());
/// assert!(validate(&changes, "Goodbye", "Hello world").is_err());
/// ```
pub fn validate(changes: &ChangeSet, old: &str, new: &str) -> Result<(), DiffError> {
    let old_side = changes.old_text();
    if old_side != old {
        return Err(DiffError::new(DiffErrorKind::OldTextMismatch {
            expected: old.chars().count(),
            found: old_side.chars().count(),
        }));
    }
    let new_side = changes.new_text();
    if new_side != new {
        return Err(DiffError::new(DiffErrorKind::NewTextMismatch {
            expected: new.chars().count(),
            found: new_side.chars().count(),
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftsmith_core::Change;

    #[test]
    fn test_rejects_wrong_old_side() {
        let changes = ChangeSet::new(vec![Change::keep("Hello"), Change::remove(" there")]);
        let err = validate(&changes, "Hello world", "Hello").unwrap_err();
        assert_eq!(
            err.kind,
            DiffErrorKind::OldTextMismatch {
                expected: 11,
                found: 11
            }
        );
    }

    #[test]
    fn test_rejects_wrong_new_side() {
        let changes = ChangeSet::new(vec![Change::keep("Hello"), Change::add("!")]);
        let err = validate(&changes, "Hello", "Hello?!").unwrap_err();
        assert!(matches!(err.kind, DiffErrorKind::NewTextMismatch { .. }));
    }

    #[test]
    fn test_empty_set_matches_empty_texts_only() {
        let empty = ChangeSet::default();
        assert!(validate(&empty, "", "").is_ok());
        assert!(validate(&empty, "x", "x").is_err());
    }
}
