//! Edit requests and their outcomes.

use crate::ChangeSet;
use draftsmith_error::{InputError, InputErrorKind};
use serde::{Deserialize, Serialize};

/// Caller's speed/quality trade-off for the edit model.
///
/// # Examples
///
/// ```
/// use draftsmith_core::ModelPreference;
///
/// let pref: ModelPreference = "quality".parse().unwrap();
/// assert_eq!(pref, ModelPreference::Quality);
/// assert_eq!(ModelPreference::default(), ModelPreference::Balanced);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModelPreference {
    /// Lowest latency
    #[display("fastest")]
    Fastest,
    /// Default trade-off
    #[default]
    #[display("balanced")]
    Balanced,
    /// Best output
    #[display("quality")]
    Quality,
}

/// A request to revise a draft.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditRequest {
    /// Draft being edited
    pub current_text: String,
    /// Natural-language edit instruction
    pub instruction: String,
    /// Model trade-off
    #[serde(default)]
    pub model_preference: ModelPreference,
}

impl EditRequest {
    /// Create a request with the default model preference.
    pub fn new(current_text: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            current_text: current_text.into(),
            instruction: instruction.into(),
            model_preference: ModelPreference::default(),
        }
    }

    /// Set the model preference.
    pub fn with_model_preference(mut self, preference: ModelPreference) -> Self {
        self.model_preference = preference;
        self
    }

    /// Both the draft and the instruction must be non-blank.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.current_text.trim().is_empty() {
            return Err(InputError::new(InputErrorKind::MissingField("postContent".to_string())));
        }
        if self.instruction.trim().is_empty() {
            return Err(InputError::new(InputErrorKind::MissingField(
                "editInstruction".to_string(),
            )));
        }
        Ok(())
    }
}

/// Replacement text, optionally with the edit's own change metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditOutcome {
    /// The revised draft
    pub text: String,
    /// Change metadata supplied by the edit endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<ChangeSet>,
}

/// Wire body of an edit request (`POST /api/edit-post`).
///
/// # Examples
///
/// ```
/// use draftsmith_core::{EditPostBody, EditRequest, ModelPreference};
///
/// let body: EditPostBody = serde_json::from_str(
///     r#"{"postContent": "Hello world", "editInstruction": "Add emojis", "modelPreference": "fastest"}"#,
/// ).unwrap();
/// let request = EditRequest::from(body);
/// assert_eq!(request.model_preference, ModelPreference::Fastest);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditPostBody {
    /// Draft being edited
    #[serde(default)]
    pub post_content: String,
    /// Natural-language edit instruction
    #[serde(default)]
    pub edit_instruction: String,
    /// Optional model trade-off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_preference: Option<ModelPreference>,
}

impl From<EditPostBody> for EditRequest {
    fn from(body: EditPostBody) -> Self {
        EditRequest::new(body.post_content, body.edit_instruction)
            .with_model_preference(body.model_preference.unwrap_or_default())
    }
}

impl From<&EditRequest> for EditPostBody {
    fn from(request: &EditRequest) -> Self {
        Self {
            post_content: request.current_text.clone(),
            edit_instruction: request.instruction.clone(),
            model_preference: Some(request.model_preference),
        }
    }
}

/// Wire reply of an edit: `{editedPost, diff?}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditPostReply {
    /// The revised draft
    #[serde(default)]
    pub edited_post: String,
    /// Optional change metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<ChangeSet>,
}

impl From<EditOutcome> for EditPostReply {
    fn from(outcome: EditOutcome) -> Self {
        Self {
            edited_post: outcome.text,
            diff: outcome.changes,
        }
    }
}

impl From<EditPostReply> for EditOutcome {
    fn from(reply: EditPostReply) -> Self {
        Self {
            text: reply.edited_post,
            changes: reply.diff,
        }
    }
}
