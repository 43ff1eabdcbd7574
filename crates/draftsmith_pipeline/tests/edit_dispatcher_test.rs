//! Edit dispatcher tests with a scripted gateway.

mod test_utils;

use draftsmith_core::{ChangeKind, EditRequest, ModelPreference, Role};
use draftsmith_error::{DraftsmithErrorKind, ExtractionErrorKind, Stage};
use draftsmith_interface::EditService;
use draftsmith_pipeline::{EditDispatcher, EditModels};
use test_utils::MockGateway;

#[tokio::test]
async fn test_plain_text_reply_without_diff() -> anyhow::Result<()> {
    let gateway = MockGateway::replying(&["Hello world 🎉"]);
    let dispatcher = EditDispatcher::new(gateway.clone(), EditModels::default());

    let outcome = dispatcher
        .edit(&EditRequest::new("Hello world", "Add emojis"))
        .await?;

    assert_eq!(outcome.text, "Hello world 🎉");
    assert!(outcome.changes.is_none());

    let (model, messages) = &gateway.calls()[0];
    assert_eq!(model, "sonar-pro");
    assert_eq!(messages[0].role, Role::System);
    assert!(messages[0].content.contains("professional LinkedIn post editor"));
    assert!(messages[1].content.contains("Add emojis"));
    assert!(messages[1].content.contains("Hello world"));
    Ok(())
}

#[tokio::test]
async fn test_preference_selects_model_and_json_diff_is_kept() -> anyhow::Result<()> {
    let reply = r#"{"editedPost": "Hi world", "diff": [
        {"type": "remove", "text": "Hello"}, {"type": "add", "text": "Hi"}, {"type": "keep", "text": " world"}
    ]}"#;
    let gateway = MockGateway::replying(&[reply]);
    let models = EditModels::default().with_quality("big-model");
    let dispatcher = EditDispatcher::new(gateway.clone(), models);

    let request = EditRequest::new("Hello world", "Be casual").with_model_preference(ModelPreference::Quality);
    let outcome = dispatcher.edit(&request).await?;

    assert_eq!(gateway.calls()[0].0, "big-model");
    let changes = outcome.changes.ok_or_else(|| anyhow::anyhow!("diff missing"))?;
    assert_eq!(changes.changes()[0].kind, ChangeKind::Remove);
    assert_eq!(changes.new_text(), "Hi world");
    Ok(())
}

#[tokio::test]
async fn test_empty_reply_is_empty_edit_result() -> anyhow::Result<()> {
    let gateway = MockGateway::replying(&["```\n\n```"]);
    let dispatcher = EditDispatcher::new(gateway, EditModels::default());

    let err = dispatcher
        .edit(&EditRequest::new("Hello world", "Add emojis"))
        .await
        .unwrap_err();

    match err.kind() {
        DraftsmithErrorKind::Extraction(e) => assert_eq!(e.kind, ExtractionErrorKind::EmptyEditResult),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.stage(), Some(Stage::Edit));
    Ok(())
}

#[tokio::test]
async fn test_blank_instruction_is_rejected_before_calling() -> anyhow::Result<()> {
    let gateway = MockGateway::replying(&["unused"]);
    let dispatcher = EditDispatcher::new(gateway.clone(), EditModels::default());

    let err = dispatcher.edit(&EditRequest::new("Hello", " ")).await.unwrap_err();

    assert!(err.is_client_error());
    assert_eq!(gateway.call_count(), 0);
    Ok(())
}
