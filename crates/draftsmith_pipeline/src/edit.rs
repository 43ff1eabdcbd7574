//! Edit dispatch through the LLM gateway.

use crate::render::EDITOR_SYSTEM;
use crate::{EditModels, ResponseExtractor};
use async_trait::async_trait;
use draftsmith_core::{ChatMessage, EditOutcome, EditRequest};
use draftsmith_error::{DraftsmithError, DraftsmithResult, Stage};
use draftsmith_interface::{EditService, LlmGateway};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Sends a draft and an instruction to the edit model.
pub struct EditDispatcher {
    gateway: Arc<dyn LlmGateway>,
    models: EditModels,
    extractor: ResponseExtractor,
}

impl EditDispatcher {
    /// Create a dispatcher choosing models from `models`.
    pub fn new(gateway: Arc<dyn LlmGateway>, models: EditModels) -> Self {
        Self {
            gateway,
            models,
            extractor: ResponseExtractor::default(),
        }
    }

    fn user_message(request: &EditRequest) -> String {
        format!(
            "Instruction: {}\n\nCurrent post:\n{}",
            request.instruction, request.current_text
        )
    }
}

#[async_trait]
impl EditService for EditDispatcher {
    #[instrument(skip(self, request), fields(preference = %request.model_preference))]
    async fn edit(&self, request: &EditRequest) -> DraftsmithResult<EditOutcome> {
        request.validate()?;

        let model = self.models.for_preference(request.model_preference);
        let messages = [
            ChatMessage::system(EDITOR_SYSTEM),
            ChatMessage::user(Self::user_message(request)),
        ];

        let raw = self
            .gateway
            .call(model, &messages)
            .await
            .map_err(|e| e.at_stage(Stage::Edit))?;

        let outcome = self
            .extractor
            .edit(&raw)
            .map_err(|e| DraftsmithError::from(e).at_stage(Stage::Edit))?;
        debug!(model, chars = outcome.text.len(), has_diff = outcome.changes.is_some(), "Edit complete");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_embeds_instruction_and_text_verbatim() {
        let request = EditRequest::new("Hello  world\n#rust", "Add emojis");
        let message = EditDispatcher::user_message(&request);
        assert!(message.contains("Add emojis"));
        assert!(message.contains("Hello  world\n#rust"));
    }
}
