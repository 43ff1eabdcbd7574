//! Prompt templates from a local TOML file.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use draftsmith_core::{PromptRole, PromptSet, PromptTemplate};
use draftsmith_error::{DraftsmithResult, PromptStoreError, PromptStoreErrorKind};
use draftsmith_interface::PromptStore;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct TemplateEntry {
    body: String,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

/// Store that reads one table per role key from a TOML file:
///
/// ```toml
/// [post-generation]
/// body = "Write posts for {{industry}} about {{title}}"
/// updated_at = "2026-01-05T10:00:00Z"
/// ```
///
/// The file is re-read on every fetch, so edits are picked up at the next cache refresh.
#[derive(Debug, Clone)]
pub struct TomlPromptStore {
    path: PathBuf,
}

impl TomlPromptStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse a complete prompt set from TOML text.
    ///
    /// Templates without `updated_at` are stamped with the current time.
    pub fn parse(content: &str) -> Result<PromptSet, PromptStoreError> {
        let entries: BTreeMap<String, TemplateEntry> = toml::from_str(content)
            .map_err(|e| PromptStoreError::new(PromptStoreErrorKind::Decode(e.to_string())))?;

        let now = Utc::now();
        let mut templates = Vec::with_capacity(entries.len());
        for (key, entry) in entries {
            match key.parse::<PromptRole>() {
                Ok(role) => templates.push((
                    role,
                    PromptTemplate::new(key, entry.body, entry.updated_at.unwrap_or(now)),
                )),
                Err(_) => debug!(key = %key, "Ignoring unknown prompt key"),
            }
        }

        PromptSet::complete(templates)
    }
}

#[async_trait]
impl PromptStore for TomlPromptStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_all(&self) -> DraftsmithResult<PromptSet> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            PromptStoreError::new(PromptStoreErrorKind::Io(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;
        let set = Self::parse(&content)?;
        debug!(count = set.len(), "Loaded prompt set from file");
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLETE: &str = r#"
[topic-generation]
body = "Suggest topics for {{industry}}"

[article-search]
body = "Find articles about {{topic}}"
updated_at = "2026-01-05T10:00:00Z"

[post-generation]
body = "Write posts about {{title}}"

[json-mode-system]
body = "Reply with JSON only."

[unused-extra]
body = "ignored"
"#;

    #[test]
    fn test_parse_complete_file() {
        let set = TomlPromptStore::parse(COMPLETE).unwrap();
        assert_eq!(set.len(), 4);
        let search = set.get(PromptRole::ArticleSearch).unwrap();
        assert_eq!(search.body(), "Find articles about {{topic}}");
        assert_eq!(search.last_updated().to_rfc3339(), "2026-01-05T10:00:00+00:00");
    }

    #[test]
    fn test_parse_rejects_incomplete_file() {
        let err = TomlPromptStore::parse("[topic-generation]\nbody = \"x\"\n").unwrap_err();
        assert!(matches!(err.kind, PromptStoreErrorKind::MissingTemplate(_)));
    }

    #[test]
    fn test_parse_rejects_invalid_toml() {
        let err = TomlPromptStore::parse("[[[").unwrap_err();
        assert!(matches!(err.kind, PromptStoreErrorKind::Decode(_)));
    }
}
