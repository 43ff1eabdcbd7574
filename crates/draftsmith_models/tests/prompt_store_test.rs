//! HTTP prompt store tests.

mod test_utils;

use axum::{Json, Router, extract::Path, http::StatusCode, response::IntoResponse, routing::get};
use draftsmith_core::PromptRole;
use draftsmith_error::{DraftsmithErrorKind, PromptStoreErrorKind};
use draftsmith_interface::PromptStore;
use draftsmith_models::HttpPromptStore;
use serde_json::json;
use test_utils::spawn_upstream;

async fn serve_template(Path(key): Path<String>) -> impl IntoResponse {
    Json(json!({
        "key": key,
        "body": format!("Template for {key}: {{{{industry}}}}"),
        "updatedAt": "2026-01-05T10:00:00Z"
    }))
}

#[tokio::test]
async fn test_fetches_every_role() -> anyhow::Result<()> {
    let app = Router::new().route("/prompts/:key", get(serve_template));
    let base = spawn_upstream(app).await?;

    let set = HttpPromptStore::new(format!("{base}/")).fetch_all().await?;

    assert_eq!(set.len(), 4);
    let post = set
        .get(PromptRole::PostGeneration)
        .ok_or_else(|| anyhow::anyhow!("post template missing"))?;
    assert_eq!(post.key(), "post-generation");
    assert_eq!(post.body(), "Template for post-generation: {{industry}}");
    Ok(())
}

#[tokio::test]
async fn test_one_missing_template_fails_the_whole_fetch() -> anyhow::Result<()> {
    let app = Router::new().route(
        "/prompts/:key",
        get(|Path(key): Path<String>| async move {
            if key == "article-search" {
                StatusCode::NOT_FOUND.into_response()
            } else {
                serve_template(Path(key)).await.into_response()
            }
        }),
    );
    let base = spawn_upstream(app).await?;

    let err = HttpPromptStore::new(base).fetch_all().await.unwrap_err();

    match err.kind() {
        DraftsmithErrorKind::PromptStore(store) => assert_eq!(
            store.kind,
            PromptStoreErrorKind::Status {
                status: 404,
                key: "article-search".to_string()
            }
        ),
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}
