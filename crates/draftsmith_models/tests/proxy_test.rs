//! Proxy edit client tests.

mod test_utils;

use axum::{Json, Router, http::StatusCode, routing::post};
use draftsmith_core::{ChangeKind, EditPostBody, EditRequest, ModelPreference};
use draftsmith_error::{DraftsmithErrorKind, ExtractionErrorKind, GatewayErrorKind, Stage};
use draftsmith_interface::EditService;
use draftsmith_models::ProxyEditClient;
use serde_json::json;
use test_utils::spawn_upstream;

#[test]
fn test_missing_base_url_is_a_configuration_error() {
    let err = ProxyEditClient::new(None).unwrap_err();
    assert!(err.message.contains("proxy.base_url"));

    assert!(ProxyEditClient::new(Some("  ")).is_err());
    assert!(ProxyEditClient::new(Some("not a url")).is_err());
}

#[test]
fn test_endpoint_is_same_origin() -> anyhow::Result<()> {
    let client = ProxyEditClient::new(Some("https://app.example.com/dashboard/"))?;
    assert_eq!(client.endpoint().as_str(), "https://app.example.com/api/edit-post");
    Ok(())
}

#[tokio::test]
async fn test_forwards_body_and_returns_diff() -> anyhow::Result<()> {
    let app = Router::new().route(
        "/api/edit-post",
        post(|Json(body): Json<EditPostBody>| async move {
            assert_eq!(body.model_preference, Some(ModelPreference::Quality));
            Json(json!({
                "editedPost": format!("{} 🎉", body.post_content),
                "diff": [
                    {"type": "keep", "text": body.post_content},
                    {"type": "add", "text": " 🎉"}
                ]
            }))
        }),
    );
    let base = spawn_upstream(app).await?;

    let client = ProxyEditClient::new(Some(&base))?;
    let request =
        EditRequest::new("Hello world", "Add emojis").with_model_preference(ModelPreference::Quality);
    let outcome = client.edit(&request).await?;

    assert_eq!(outcome.text, "Hello world 🎉");
    let changes = outcome.changes.ok_or_else(|| anyhow::anyhow!("diff missing"))?;
    assert_eq!(changes.changes()[1].kind, ChangeKind::Add);
    Ok(())
}

#[tokio::test]
async fn test_empty_edited_post_is_rejected() -> anyhow::Result<()> {
    let app = Router::new().route(
        "/api/edit-post",
        post(|| async { Json(json!({"editedPost": ""})) }),
    );
    let base = spawn_upstream(app).await?;

    let client = ProxyEditClient::new(Some(&base))?;
    let err = client
        .edit(&EditRequest::new("Hello world", "Add emojis"))
        .await
        .unwrap_err();

    match err.kind() {
        DraftsmithErrorKind::Extraction(e) => {
            assert_eq!(e.kind, ExtractionErrorKind::EmptyEditResult)
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.stage(), Some(Stage::Edit));
    Ok(())
}

#[tokio::test]
async fn test_bad_gateway_from_proxy_is_tagged_with_edit_stage() -> anyhow::Result<()> {
    let app = Router::new().route(
        "/api/edit-post",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let base = spawn_upstream(app).await?;

    let client = ProxyEditClient::new(Some(&base))?;
    let err = client
        .edit(&EditRequest::new("Hello world", "Add emojis"))
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Some(Stage::Edit));
    match err.kind() {
        DraftsmithErrorKind::Gateway(e) => {
            assert_eq!(
                e.kind,
                GatewayErrorKind::Http {
                    status: 502,
                    body: "upstream down".to_string()
                }
            )
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}
