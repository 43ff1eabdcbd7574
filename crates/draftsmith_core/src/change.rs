//! Structured change metadata between two versions of a draft.

use serde::{Deserialize, Serialize};

/// What a [`Change`] segment does to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Text present in both versions
    #[display("keep")]
    Keep,
    /// Text only in the new version
    #[display("add")]
    Add,
    /// Text only in the old version
    #[display("remove")]
    Remove,
}

/// One `{type, text}` segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Change {
    /// Segment kind
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    /// Segment text
    pub text: String,
}

impl Change {
    /// A `keep` segment.
    pub fn keep(text: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Keep,
            text: text.into(),
        }
    }

    /// An `add` segment.
    pub fn add(text: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Add,
            text: text.into(),
        }
    }

    /// A `remove` segment.
    pub fn remove(text: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Remove,
            text: text.into(),
        }
    }
}

/// Ordered keep/add/remove segments describing an edit.
///
/// `keep` + `remove` segments reconstruct the old text and `keep` + `add`
/// segments reconstruct the new text.
///
/// # Examples
///
/// ```
/// use draftsmith_core::{Change, ChangeSet};
///
/// let changes = ChangeSet::new(vec![
///     Change::keep("Hello "),
///     Change::remove("world"),
///     Change::add("there"),
/// ]);
/// assert_eq!(changes.old_text(), "Hello world");
/// assert_eq!(changes.new_text(), "Hello there");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet(Vec<Change>);

impl ChangeSet {
    /// Wrap a list of segments.
    pub fn new(changes: Vec<Change>) -> Self {
        Self(changes)
    }

    /// Segments in order.
    pub fn changes(&self) -> &[Change] {
        &self.0
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Concatenation of `keep` and `remove` segments.
    pub fn old_text(&self) -> String {
        self.concat(ChangeKind::Remove)
    }

    /// Concatenation of `keep` and `add` segments.
    pub fn new_text(&self) -> String {
        self.concat(ChangeKind::Add)
    }

    fn concat(&self, side: ChangeKind) -> String {
        self.0
            .iter()
            .filter(|c| c.kind == ChangeKind::Keep || c.kind == side)
            .map(|c| c.text.as_str())
            .collect()
    }

    /// Describe `old -> new` as shared prefix, removed middle, added middle, shared suffix.
    ///
    /// Empty segments are omitted. Boundaries always fall on `char` boundaries.
    ///
    /// # Examples
    ///
    /// ```
    /// use draftsmith_core::{Change, ChangeSet};
    ///
    /// let changes = ChangeSet::between("Hello world", "Hello world 🎉");
    /// assert_eq!(changes.changes(), &[Change::keep("Hello world"), Change::add(" 🎉")]);
    /// ```
    pub fn between(old: &str, new: &str) -> Self {
        let prefix = common_prefix(old, new).len();
        let old_rest = &old[prefix..];
        let new_rest = &new[prefix..];
        let suffix = common_suffix_len(old_rest, new_rest);

        let segments = [
            Change::keep(&old[..prefix]),
            Change::remove(&old_rest[..old_rest.len() - suffix]),
            Change::add(&new_rest[..new_rest.len() - suffix]),
            Change::keep(&old_rest[old_rest.len() - suffix..]),
        ];
        Self(segments.into_iter().filter(|c| !c.text.is_empty()).collect())
    }
}

impl From<Vec<Change>> for ChangeSet {
    fn from(changes: Vec<Change>) -> Self {
        Self(changes)
    }
}

/// Longest common prefix of `a` and `b`, as a slice of `a` ending on a char boundary.
///
/// # Examples
///
/// ```
/// use draftsmith_core::common_prefix;
///
/// assert_eq!(common_prefix("Hello world", "Help"), "Hel");
/// assert_eq!(common_prefix("🎉a", "🎊a"), "");
/// ```
pub fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()));
    &a[..len]
}

/// Byte length of the longest common suffix, ending on char boundaries in both strings.
fn common_suffix_len(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(ca, cb)| ca == cb)
        .map(|(c, _)| c.len_utf8())
        .sum()
}
