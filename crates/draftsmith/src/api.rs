//! HTTP API for generation, summarization and edits.

use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use draftsmith_core::{
    ArticleRef, ArticleSummary, ChangeSet, EditPostBody, EditPostReply, EditRequest, GenerationRequest,
    TopicSuggestion,
};
use draftsmith_diff::validate;
use draftsmith_error::{DraftsmithError, InputError, InputErrorKind};
use draftsmith_interface::EditService;
use draftsmith_pipeline::GenerationPipeline;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, instrument, warn};

/// Industry and topic label used when a request leaves them out.
const DEFAULT_LABEL: &str = "General";

/// API state shared by all handlers.
#[derive(Clone)]
pub struct ApiState {
    pipeline: Arc<GenerationPipeline>,
    editor: Arc<dyn EditService>,
}

impl ApiState {
    /// Creates new API state.
    pub fn new(pipeline: Arc<GenerationPipeline>, editor: Arc<dyn EditService>) -> Self {
        Self { pipeline, editor }
    }
}

/// Creates the API router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/generate-posts", post(generate_posts))
        .route("/api/summarize-url", post(summarize_url))
        .route("/api/edit-post", post(edit_post))
        .route("/api/topics", post(topics))
        .with_state(state)
}

/// `{error}` body with 400 for caller mistakes and 500 for everything else.
#[derive(Debug)]
pub struct ApiError(DraftsmithError);

impl From<DraftsmithError> for ApiError {
    fn from(err: DraftsmithError) -> Self {
        Self(err)
    }
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            warn!(error = %self.0, "Rejected request");
            StatusCode::BAD_REQUEST
        } else {
            error!(error = %self.0, stage = ?self.0.stage(), "Request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({"error": self.0.to_string()}))).into_response()
    }
}

/// Unwrap a JSON body, turning extractor rejections into `{error}` 400s.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| InputError::new(InputErrorKind::Invalid(rejection.body_text())).into())
}

fn label_or_default(label: Option<String>) -> String {
    label
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LABEL.to_string())
}

/// `POST /api/generate-posts` body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePostsBody {
    /// An article object for `topic`, a URL string for `url`
    #[serde(default)]
    pub input: Value,
    /// `"topic"` or `"url"`
    #[serde(default)]
    pub input_type: String,
    /// Audience industry
    #[serde(default)]
    pub industry: Option<String>,
    /// Topic label
    #[serde(default)]
    pub topic_label: Option<String>,
}

impl TryFrom<GeneratePostsBody> for GenerationRequest {
    type Error = InputError;

    fn try_from(body: GeneratePostsBody) -> Result<Self, Self::Error> {
        let industry = label_or_default(body.industry);
        let topic_label = label_or_default(body.topic_label);
        match body.input_type.as_str() {
            "topic" => {
                let article: ArticleRef = serde_json::from_value(body.input)
                    .map_err(|e| InputError::new(InputErrorKind::Invalid(format!("input article: {}", e))))?;
                Ok(Self::Topic {
                    article,
                    industry,
                    topic_label,
                })
            }
            "url" => match body.input {
                Value::String(url) => Ok(Self::Url {
                    url,
                    industry,
                    topic_label,
                }),
                _ => Err(InputError::new(InputErrorKind::Invalid(
                    "input must be a URL string".to_string(),
                ))),
            },
            "" => Err(InputError::new(InputErrorKind::MissingField("inputType".to_string()))),
            other => Err(InputError::new(InputErrorKind::UnsupportedInputType(other.to_string()))),
        }
    }
}

/// `POST /api/summarize-url` body.
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeBody {
    /// Page to summarize
    #[serde(default)]
    pub url: String,
}

/// `POST /api/topics` body.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicsBody {
    /// Audience industry
    #[serde(default)]
    pub industry: Option<String>,
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

#[instrument(skip_all)]
async fn generate_posts(
    State(state): State<ApiState>,
    payload: Result<Json<GeneratePostsBody>, JsonRejection>,
) -> Result<Json<Vec<String>>, ApiError> {
    let request = GenerationRequest::try_from(body(payload)?)?;
    let drafts = state.pipeline.generate(&request).await?;
    Ok(Json(drafts.into_vec()))
}

#[instrument(skip_all)]
async fn summarize_url(
    State(state): State<ApiState>,
    payload: Result<Json<SummarizeBody>, JsonRejection>,
) -> Result<Json<ArticleSummary>, ApiError> {
    let SummarizeBody { url } = body(payload)?;
    Ok(Json(state.pipeline.summarize_url(&url).await?))
}

#[instrument(skip_all)]
async fn edit_post(
    State(state): State<ApiState>,
    payload: Result<Json<EditPostBody>, JsonRejection>,
) -> Result<Json<EditPostReply>, ApiError> {
    let request = EditRequest::from(body(payload)?);
    let mut outcome = state.editor.edit(&request).await?;

    let supplied_is_valid = outcome
        .changes
        .as_ref()
        .is_some_and(|changes| validate(changes, &request.current_text, &outcome.text).is_ok());
    if !supplied_is_valid {
        if outcome.changes.is_some() {
            warn!("Replacing change set that does not match the edit");
        }
        outcome.changes = Some(ChangeSet::between(&request.current_text, &outcome.text));
    }

    Ok(Json(EditPostReply::from(outcome)))
}

#[instrument(skip_all)]
async fn topics(
    State(state): State<ApiState>,
    payload: Result<Json<TopicsBody>, JsonRejection>,
) -> Result<Json<Vec<TopicSuggestion>>, ApiError> {
    let industry = label_or_default(body(payload)?.industry);
    Ok(Json(state.pipeline.suggest_topics(&industry).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: Value) -> Result<GenerationRequest, InputError> {
        GenerationRequest::try_from(serde_json::from_value::<GeneratePostsBody>(value).unwrap())
    }

    #[test]
    fn test_url_body_defaults_labels() {
        let request = parse(json!({"input": "https://example.com/a", "inputType": "url"})).unwrap();
        assert_eq!(request.kind_name(), "url");
        assert_eq!(request.industry(), "General");
        assert_eq!(request.topic_label(), "General");
    }

    #[test]
    fn test_topic_body_reads_article() {
        let request = parse(json!({
            "inputType": "topic",
            "input": {"id": "a1", "title": "T", "summary": "S", "sourceUrl": "http://x"},
            "industry": "Tech",
            "topicLabel": "AI"
        }))
        .unwrap();
        assert!(matches!(request, GenerationRequest::Topic { ref article, .. } if article.id == "a1"));
        assert_eq!(request.industry(), "Tech");
    }

    #[test]
    fn test_unknown_input_type_rejected() {
        let err = parse(json!({"input": "x", "inputType": "podcast"})).unwrap_err();
        assert_eq!(err.kind, InputErrorKind::UnsupportedInputType("podcast".to_string()));
    }

    #[test]
    fn test_url_input_must_be_string() {
        let err = parse(json!({"input": {"url": "https://example.com"}, "inputType": "url"})).unwrap_err();
        assert!(matches!(err.kind, InputErrorKind::Invalid(_)));
    }
}
