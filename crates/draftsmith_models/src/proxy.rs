//! Client of a same-origin `/api/edit-post` endpoint.

use async_trait::async_trait;
use draftsmith_core::{EditOutcome, EditPostBody, EditPostReply, EditRequest};
use draftsmith_error::{
    ConfigError, DraftsmithResult, ExtractionError, ExtractionErrorKind, GatewayError,
    GatewayErrorKind, Stage,
};
use draftsmith_interface::EditService;
use reqwest::{Client, Url};
use tracing::{debug, error, instrument};

/// Forwards edits to a proxy that owns the provider credentials.
#[derive(Debug, Clone)]
pub struct ProxyEditClient {
    client: Client,
    endpoint: Url,
}

impl ProxyEditClient {
    /// Create a client for the proxy at `base_url`.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when no base URL is configured or it does not parse.
    pub fn new(base_url: Option<&str>) -> Result<Self, ConfigError> {
        let base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ConfigError::new("proxy.base_url is not configured"))?;

        let base = Url::parse(base_url)
            .map_err(|e| ConfigError::new(format!("proxy.base_url '{}' is invalid: {}", base_url, e)))?;
        let endpoint = base
            .join("/api/edit-post")
            .map_err(|e| ConfigError::new(format!("Cannot build edit endpoint: {}", e)))?;

        debug!(endpoint = %endpoint, "Creating proxy edit client");
        Ok(Self {
            client: Client::new(),
            endpoint,
        })
    }

    /// Full URL edits are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn forward(&self, request: &EditRequest) -> DraftsmithResult<EditOutcome> {
        request.validate()?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&EditPostBody::from(request))
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Edit proxy request failed");
                GatewayError::new(GatewayErrorKind::Unavailable(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Edit proxy returned error");
            return Err(GatewayError::new(GatewayErrorKind::Http {
                status: status.as_u16(),
                body,
            })
            .into());
        }

        let reply: EditPostReply = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to decode edit proxy reply");
            ExtractionError::malformed(Stage::Edit, &e.to_string())
        })?;

        if reply.edited_post.trim().is_empty() {
            return Err(ExtractionError::new(ExtractionErrorKind::EmptyEditResult).into());
        }

        debug!(has_diff = reply.diff.is_some(), "Received edited post");
        Ok(reply.into())
    }
}

#[async_trait]
impl EditService for ProxyEditClient {
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint, preference = %request.model_preference))]
    async fn edit(&self, request: &EditRequest) -> DraftsmithResult<EditOutcome> {
        self.forward(request).await.map_err(|e| e.at_stage(Stage::Edit))
    }
}
