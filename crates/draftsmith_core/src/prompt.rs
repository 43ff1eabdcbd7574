//! Prompt templates and the complete set the pipeline renders from.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use draftsmith_error::{PromptStoreError, PromptStoreErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// Logical purpose of a prompt template.
///
/// The store key of each role is its kebab-case name.
///
/// # Examples
///
/// ```
/// use draftsmith_core::PromptRole;
///
/// assert_eq!(PromptRole::PostGeneration.key(), "post-generation");
/// assert_eq!(PromptRole::all().count(), 4);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::AsRefStr,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PromptRole {
    /// Suggests topics for an industry
    TopicGeneration,
    /// Finds articles for a topic
    ArticleSearch,
    /// Drafts posts from an article
    PostGeneration,
    /// System message that demands JSON-only replies
    JsonModeSystem,
}

impl PromptRole {
    /// Key used to look the template up in the store.
    pub fn key(&self) -> &str {
        self.as_ref()
    }

    /// Every role, in declaration order.
    pub fn all() -> impl Iterator<Item = PromptRole> {
        Self::iter()
    }
}

/// A versioned template body with `{{name}}` placeholders. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct PromptTemplate {
    key: String,
    body: String,
    last_updated: DateTime<Utc>,
}

impl PromptTemplate {
    /// Create a template.
    pub fn new(key: impl Into<String>, body: impl Into<String>, last_updated: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            body: body.into(),
            last_updated,
        }
    }
}

/// Mapping from [`PromptRole`] to template.
///
/// A set is either empty (process start) or complete; it is never partially filled.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use draftsmith_core::{PromptRole, PromptSet, PromptTemplate};
///
/// let templates = PromptRole::all()
///     .map(|role| (role, PromptTemplate::new(role.key(), "body", Utc::now())));
/// let set = PromptSet::complete(templates).unwrap();
/// assert_eq!(set.len(), 4);
/// assert!(set.get(PromptRole::ArticleSearch).is_some());
///
/// assert!(PromptSet::empty().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PromptSet {
    templates: BTreeMap<PromptRole, PromptTemplate>,
}

impl PromptSet {
    /// The set a process starts with.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set that covers every role.
    ///
    /// # Errors
    ///
    /// Returns [`PromptStoreErrorKind::MissingTemplate`] naming the first absent role.
    pub fn complete(
        templates: impl IntoIterator<Item = (PromptRole, PromptTemplate)>,
    ) -> Result<Self, PromptStoreError> {
        let templates: BTreeMap<_, _> = templates.into_iter().collect();
        if let Some(missing) = PromptRole::all().find(|role| !templates.contains_key(role)) {
            return Err(PromptStoreError::new(PromptStoreErrorKind::MissingTemplate(
                missing.key().to_string(),
            )));
        }
        Ok(Self { templates })
    }

    /// Template for a role.
    pub fn get(&self, role: PromptRole) -> Option<&PromptTemplate> {
        self.templates.get(&role)
    }

    /// Number of templates held.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True before the first successful refresh.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Most recent `last_updated` across the set.
    pub fn newest_update(&self) -> Option<DateTime<Utc>> {
        self.templates.values().map(|t| t.last_updated).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_set_is_rejected() {
        let now = Utc::now();
        let partial = [
            (PromptRole::TopicGeneration, PromptTemplate::new("topic-generation", "a", now)),
            (PromptRole::PostGeneration, PromptTemplate::new("post-generation", "b", now)),
        ];
        let err = PromptSet::complete(partial).unwrap_err();
        assert_eq!(
            err.kind,
            PromptStoreErrorKind::MissingTemplate("article-search".to_string())
        );
    }

    #[test]
    fn test_role_keys_round_trip() {
        for role in PromptRole::all() {
            let parsed: PromptRole = role.key().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_newest_update_is_latest_template() {
        let old = Utc::now() - chrono::Duration::hours(1);
        let new = Utc::now();
        let set = PromptSet::complete(PromptRole::all().map(|role| {
            let at = if role == PromptRole::ArticleSearch { new } else { old };
            (role, PromptTemplate::new(role.key(), "body", at))
        }))
        .unwrap();
        assert_eq!(set.newest_update(), Some(new));
        assert_eq!(PromptSet::empty().newest_update(), None);
    }
}
