//! Wiring of gateway, prompt cache, pipeline and edit services.

use crate::{ApiState, BuiltinPromptStore, DraftsmithConfig, EditSession, create_router};
use axum::Router;
use draftsmith_cache::{PromptCache, TomlPromptStore};
use draftsmith_diff::Animator;
use draftsmith_error::DraftsmithResult;
use draftsmith_interface::{EditService, LlmGateway, PromptStore};
use draftsmith_models::{ChatCompletionGateway, HttpPromptStore, ProxyEditClient};
use draftsmith_pipeline::{EditDispatcher, GenerationPipeline};
use std::sync::Arc;
use tracing::{debug, info};

/// A configured Draftsmith instance.
pub struct Draftsmith {
    config: DraftsmithConfig,
    prompts: Arc<PromptCache>,
    pipeline: Arc<GenerationPipeline>,
    editor: Arc<dyn EditService>,
}

impl Draftsmith {
    /// Build every service from configuration.
    pub fn from_config(config: DraftsmithConfig) -> Self {
        let gateway = ChatCompletionGateway::new(config.gateway().endpoint(), config.gateway().api_key_env());
        info!(provider = gateway.provider_name(), "Using chat-completion gateway");
        let store = prompt_store(&config);
        Self::with_services(config, Arc::new(gateway), store)
    }

    /// Build around an explicit gateway and prompt store.
    pub fn with_services(
        config: DraftsmithConfig,
        gateway: Arc<dyn LlmGateway>,
        store: Arc<dyn PromptStore>,
    ) -> Self {
        let prompts = Arc::new(PromptCache::new(config.cache_config(), store));
        let pipeline = Arc::new(GenerationPipeline::new(
            Arc::clone(&gateway),
            Arc::clone(&prompts),
            config.pipeline_config(),
        ));
        let editor: Arc<dyn EditService> =
            Arc::new(EditDispatcher::new(gateway, config.models().edit().clone()));

        Self {
            config,
            prompts,
            pipeline,
            editor,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &DraftsmithConfig {
        &self.config
    }

    /// Shared prompt cache.
    pub fn prompts(&self) -> &Arc<PromptCache> {
        &self.prompts
    }

    /// Generation pipeline.
    pub fn pipeline(&self) -> &Arc<GenerationPipeline> {
        &self.pipeline
    }

    /// Edit session talking to the model directly.
    pub fn session(&self) -> EditSession {
        EditSession::new(Arc::clone(&self.editor), self.animator())
    }

    /// Edit session going through the same-origin proxy.
    ///
    /// # Errors
    ///
    /// `proxy.base_url` is not configured or is not a URL.
    pub fn proxy_session(&self) -> DraftsmithResult<EditSession> {
        let client = ProxyEditClient::new(self.config.proxy().base_url().as_deref())?;
        debug!(endpoint = %client.endpoint(), "Using edit proxy");
        Ok(EditSession::new(Arc::new(client), self.animator()))
    }

    /// HTTP router over these services.
    pub fn router(&self) -> Router {
        create_router(ApiState::new(Arc::clone(&self.pipeline), Arc::clone(&self.editor)))
    }

    fn animator(&self) -> Animator {
        Animator::new(self.config.animation().clone())
    }
}

fn prompt_store(config: &DraftsmithConfig) -> Arc<dyn PromptStore> {
    let prompts = config.prompts();
    if let Some(url) = prompts.store_url() {
        info!(store_url = %url, "Using HTTP prompt store");
        Arc::new(HttpPromptStore::new(url.clone()))
    } else if let Some(path) = prompts.file() {
        info!(path = %path.display(), "Using prompt file");
        Arc::new(TomlPromptStore::new(path.clone()))
    } else {
        info!("No prompt store configured, using built-in templates");
        Arc::new(BuiltinPromptStore)
    }
}
