//! OpenAI-compatible chat-completion gateway.

use crate::{ChatCompletionRequest, ChatCompletionResponse, LlmMetrics, classify_error};
use async_trait::async_trait;
use draftsmith_core::ChatMessage;
use draftsmith_error::{DraftsmithResult, GatewayError, GatewayErrorKind};
use draftsmith_interface::LlmGateway;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, error, instrument};

/// Gateway to any endpoint speaking the chat-completion protocol.
///
/// The API key is looked up in the environment variable named at construction,
/// on every call, unless one was set explicitly with [`with_api_key`](Self::with_api_key).
#[derive(Debug, Clone)]
pub struct ChatCompletionGateway {
    client: Client,
    endpoint: String,
    api_key_env: String,
    api_key: Option<String>,
    provider: String,
}

impl ChatCompletionGateway {
    /// Create a gateway posting to `endpoint`, authenticated by `$api_key_env`.
    pub fn new(endpoint: impl Into<String>, api_key_env: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        let provider = provider_from_endpoint(&endpoint);
        debug!(endpoint = %endpoint, provider = %provider, "Creating chat completion gateway");
        Self {
            client: Client::new(),
            endpoint,
            api_key_env: api_key_env.into(),
            api_key: None,
            provider,
        }
    }

    /// Use a fixed API key instead of the environment.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the provider label used in logs and metrics.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Endpoint requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_key(&self) -> Result<String, GatewayError> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(GatewayError::new(GatewayErrorKind::Unavailable(format!(
                "API key environment variable {} is not set",
                self.api_key_env
            )))),
        }
    }

    async fn send(&self, model: &str, messages: &[ChatMessage]) -> Result<String, GatewayError> {
        let api_key = self.api_key()?;
        let request = ChatCompletionRequest::new(model, messages);

        debug!(message_count = messages.len(), "Sending chat completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send chat completion request");
                GatewayError::new(GatewayErrorKind::Unavailable(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Chat completion endpoint returned error");
            return Err(GatewayError::new(GatewayErrorKind::Http {
                status: status.as_u16(),
                body,
            }));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to decode chat completion response");
            GatewayError::new(GatewayErrorKind::EmptyResponse)
        })?;

        if let Some(usage) = completion.usage {
            LlmMetrics::get().record_tokens(model, usage.total_tokens);
        }

        completion
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| GatewayError::new(GatewayErrorKind::EmptyResponse))
    }
}

#[async_trait]
impl LlmGateway for ChatCompletionGateway {
    #[instrument(skip(self, messages), fields(provider = %self.provider, model = %model))]
    async fn call(&self, model: &str, messages: &[ChatMessage]) -> DraftsmithResult<String> {
        let start = Instant::now();
        let metrics = LlmMetrics::get();

        match self.send(model, messages).await {
            Ok(content) => {
                let elapsed = start.elapsed().as_secs_f64();
                metrics.record_request(&self.provider, model, elapsed);
                debug!(chars = content.len(), duration_secs = elapsed, "Chat completion succeeded");
                Ok(content)
            }
            Err(e) => {
                metrics.record_error(&self.provider, model, classify_error(&e));
                Err(e.into())
            }
        }
    }

    fn provider_name(&self) -> &str {
        &self.provider
    }
}

fn provider_from_endpoint(endpoint: &str) -> String {
    reqwest::Url::parse(endpoint)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .map(|host| {
            let parts: Vec<&str> = host.split('.').collect();
            match parts.as_slice() {
                [.., name, _tld] => name.to_string(),
                [single] => single.to_string(),
                [] => host.clone(),
            }
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_endpoint() {
        assert_eq!(
            provider_from_endpoint("https://api.perplexity.ai/chat/completions"),
            "perplexity"
        );
        assert_eq!(
            provider_from_endpoint("https://api.openai.com/v1/chat/completions"),
            "openai"
        );
        assert_eq!(provider_from_endpoint("http://localhost:8080/v1"), "localhost");
        assert_eq!(provider_from_endpoint("nonsense"), "unknown");
    }
}
