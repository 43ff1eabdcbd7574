//! Edit sessions: dispatch an edit, then replay it as an animation.

use draftsmith_core::{ChangeSet, EditOutcome, EditRequest};
use draftsmith_diff::{Animation, AnimationOutcome, Animator, Frame, validate};
use draftsmith_error::{DraftsmithError, DraftsmithResult, Stage};
use draftsmith_interface::EditService;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Result of one edit in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEdit {
    /// What the edit service returned
    pub outcome: EditOutcome,
    /// How playback ended
    pub animation: AnimationOutcome,
}

/// Runs edits against one [`EditService`] and animates each result.
///
/// Sessions share one [`Animator`], so a newer edit cancels the animation of
/// an older one still playing; only the newest edit reports completion.
#[derive(Clone)]
pub struct EditSession {
    service: Arc<dyn EditService>,
    animator: Animator,
}

impl EditSession {
    /// Create a session.
    pub fn new(service: Arc<dyn EditService>, animator: Animator) -> Self {
        Self { service, animator }
    }

    /// Shared animator.
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Dispatch the edit and start its animation without playing it.
    ///
    /// A change set that does not describe `current_text -> edited text` is
    /// discarded and the animation falls back to prefix mode.
    #[instrument(skip(self, request), fields(preference = %request.model_preference))]
    pub async fn prepare(&self, request: &EditRequest) -> DraftsmithResult<(EditOutcome, Animation)> {
        let outcome = self
            .service
            .edit(request)
            .await
            .map_err(|e| e.at_stage(Stage::Edit))?;

        let changes = outcome
            .changes
            .clone()
            .and_then(|changes| usable_changes(changes, &request.current_text, &outcome.text));

        let animation = self
            .animator
            .animate(&request.current_text, &outcome.text, changes)
            .map_err(|e| DraftsmithError::from(e).at_stage(Stage::Edit))?;

        info!(
            chars = outcome.text.chars().count(),
            structured = outcome.changes.is_some(),
            "Edit received"
        );
        Ok((outcome, animation))
    }

    /// Dispatch the edit and play its animation through `render`.
    pub async fn edit<F>(&self, request: &EditRequest, render: F) -> DraftsmithResult<SessionEdit>
    where
        F: FnMut(&Frame),
    {
        let (outcome, animation) = self.prepare(request).await?;
        let animation = animation.run(render).await;
        Ok(SessionEdit { outcome, animation })
    }
}

fn usable_changes(changes: ChangeSet, old: &str, new: &str) -> Option<ChangeSet> {
    match validate(&changes, old, new) {
        Ok(()) => Some(changes),
        Err(e) => {
            warn!(error = %e, "Discarding change set that does not match the edit");
            None
        }
    }
}
