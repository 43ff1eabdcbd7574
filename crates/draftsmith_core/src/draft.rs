//! The ordered set of drafts one pipeline run produces.

use draftsmith_error::{ExtractionError, ExtractionErrorKind};
use serde::{Deserialize, Serialize};

/// Upper bound on drafts per run.
pub const MAX_DRAFTS: usize = 4;

/// 1 to [`MAX_DRAFTS`] non-blank drafts in presentation order. Index 0 is the default pick.
///
/// # Examples
///
/// ```
/// use draftsmith_core::DraftSet;
///
/// let drafts = DraftSet::new(vec!["first".into(), "  ".into(), "second".into()]).unwrap();
/// assert_eq!(drafts.as_slice(), &["first".to_string(), "second".to_string()]);
/// assert_eq!(drafts.primary(), "first");
///
/// assert!(DraftSet::new(vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftSet(Vec<String>);

impl DraftSet {
    /// Keep non-blank drafts in order, capped at [`MAX_DRAFTS`].
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionErrorKind::NoExtractablePosts`] when nothing remains.
    pub fn new(drafts: Vec<String>) -> Result<Self, ExtractionError> {
        let drafts: Vec<String> = drafts
            .into_iter()
            .filter(|d| !d.trim().is_empty())
            .take(MAX_DRAFTS)
            .collect();

        if drafts.is_empty() {
            return Err(ExtractionError::new(ExtractionErrorKind::NoExtractablePosts));
        }
        Ok(Self(drafts))
    }

    /// Drafts in order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// The default-selected draft.
    pub fn primary(&self) -> &str {
        &self.0[0]
    }

    /// Number of drafts (always at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take the drafts out.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl IntoIterator for DraftSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps_at_four() {
        let drafts = (0..6).map(|i| format!("draft {i}")).collect();
        let set = DraftSet::new(drafts).unwrap();
        assert_eq!(set.len(), MAX_DRAFTS);
        assert_eq!(set.as_slice()[3], "draft 3");
    }

    #[test]
    fn test_all_blank_is_failure() {
        let err = DraftSet::new(vec![String::new(), " \n".to_string()]).unwrap_err();
        assert_eq!(err.kind, ExtractionErrorKind::NoExtractablePosts);
    }
}
