//! Async traits implemented by providers and consumed by the pipeline.

use async_trait::async_trait;
use draftsmith_core::{ChatMessage, EditOutcome, EditRequest, PromptSet};
use draftsmith_error::DraftsmithResult;

/// A single outbound chat-completion call.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send `messages` to `model` and return the raw reply text.
    ///
    /// # Errors
    ///
    /// `GatewayErrorKind::Unavailable` when no API key is configured (raised
    /// before any network I/O), `GatewayErrorKind::Http` for a non-success
    /// status and `GatewayErrorKind::EmptyResponse` when the reply has no content.
    async fn call(&self, model: &str, messages: &[ChatMessage]) -> DraftsmithResult<String>;

    /// Provider name used in logs and metrics (e.g. "openai", "perplexity").
    fn provider_name(&self) -> &str;
}

/// Read-only access to the prompt template store.
#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Fetch every prompt role.
    ///
    /// Returns a complete [`PromptSet`] or an error, never a partial set.
    async fn fetch_all(&self) -> DraftsmithResult<PromptSet>;
}

/// Revises a draft according to a natural-language instruction.
#[async_trait]
pub trait EditService: Send + Sync {
    /// Produce the replacement draft.
    async fn edit(&self, request: &EditRequest) -> DraftsmithResult<EditOutcome>;
}
