//! HTTP client of the prompt template store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use draftsmith_core::{PromptRole, PromptSet, PromptTemplate};
use draftsmith_error::{DraftsmithResult, PromptStoreError, PromptStoreErrorKind};
use draftsmith_interface::PromptStore;
use futures::future::try_join_all;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

/// Template document served by `GET {store_url}/prompts/{key}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptDocument {
    /// Template key
    pub key: String,
    /// Template body with `{{name}}` placeholders
    pub body: String,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// Prompt store reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPromptStore {
    client: Client,
    store_url: String,
}

impl HttpPromptStore {
    /// Create a client for the store rooted at `store_url`.
    pub fn new(store_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            store_url: store_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[instrument(skip(self), fields(store_url = %self.store_url))]
    async fn fetch_one(&self, role: PromptRole) -> Result<(PromptRole, PromptTemplate), PromptStoreError> {
        let url = format!("{}/prompts/{}", self.store_url, role.key());
        debug!(url = %url, "Fetching prompt template");

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!(error = ?e, "Prompt store request failed");
            PromptStoreError::new(PromptStoreErrorKind::Request(e.to_string()))
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            error!(status, key = role.key(), "Prompt store returned error");
            return Err(PromptStoreError::new(PromptStoreErrorKind::Status {
                status,
                key: role.key().to_string(),
            }));
        }

        let document: PromptDocument = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to decode prompt template");
            PromptStoreError::new(PromptStoreErrorKind::Decode(e.to_string()))
        })?;

        Ok((
            role,
            PromptTemplate::new(document.key, document.body, document.updated_at),
        ))
    }
}

#[async_trait]
impl PromptStore for HttpPromptStore {
    #[instrument(skip(self))]
    async fn fetch_all(&self) -> DraftsmithResult<PromptSet> {
        let templates = try_join_all(PromptRole::all().map(|role| self.fetch_one(role))).await?;
        let set = PromptSet::complete(templates)?;
        debug!(count = set.len(), "Fetched prompt set");
        Ok(set)
    }
}
