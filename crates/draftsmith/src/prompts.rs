//! Prompt store used when neither a store URL nor a prompt file is configured.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use draftsmith_core::{PromptRole, PromptSet, PromptTemplate};
use draftsmith_error::DraftsmithResult;
use draftsmith_interface::PromptStore;
use draftsmith_pipeline::default_template;

/// Serves the compiled-in templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPromptStore;

#[async_trait]
impl PromptStore for BuiltinPromptStore {
    async fn fetch_all(&self) -> DraftsmithResult<PromptSet> {
        let templates = PromptRole::all().map(|role| {
            let template = PromptTemplate::new(role.key(), default_template(role), DateTime::<Utc>::UNIX_EPOCH);
            (role, template)
        });
        Ok(PromptSet::complete(templates)?)
    }
}
