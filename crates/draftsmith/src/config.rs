//! Application configuration.
//!
//! Sources, lowest precedence first:
//! 1. Bundled defaults (include_str! from draftsmith.toml)
//! 2. `~/.config/draftsmith/draftsmith.toml`
//! 3. `./draftsmith.toml`
//! 4. `DRAFTSMITH_<SECTION>__<KEY>` environment variables

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use draftsmith_cache::PromptCacheConfig;
use draftsmith_diff::AnimationConfig;
use draftsmith_error::{ConfigError, DraftsmithError, DraftsmithResult};
use draftsmith_pipeline::{EditModels, PipelineConfig, StageModels};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../draftsmith.toml");

/// Chat-completion provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GatewayConfig {
    /// Chat-completion endpoint URL
    #[serde(default = "default_endpoint")]
    endpoint: String,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    api_key_env: String,
}

fn default_endpoint() -> String {
    "https://api.perplexity.ai/chat/completions".to_string()
}

fn default_api_key_env() -> String {
    "PERPLEXITY_API_KEY".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Model identifiers per stage, plus the edit models.
///
/// ```toml
/// [models]
/// posts = "sonar-pro"
///
/// [models.edit]
/// quality = "sonar-reasoning-pro"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ModelsConfig {
    /// Generation stage models
    #[serde(flatten)]
    stages: StageModels,
    /// Edit models by preference
    #[serde(default)]
    edit: EditModels,
}

/// Where prompt templates come from and how long they are cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PromptsConfig {
    /// Cache lifetime in seconds
    #[serde(default = "default_ttl_secs")]
    ttl_secs: u64,
    /// Base URL of an HTTP prompt template store
    #[serde(default)]
    store_url: Option<String>,
    /// TOML prompt file, used when no store URL is set
    #[serde(default)]
    file: Option<PathBuf>,
}

fn default_ttl_secs() -> u64 {
    300
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            store_url: None,
            file: None,
        }
    }
}

/// Same-origin proxy used by the edit client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ProxyConfig {
    /// Base URL; never defaulted
    #[serde(default)]
    base_url: Option<String>,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_bind")]
    bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Complete Draftsmith configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct DraftsmithConfig {
    /// Provider settings
    #[serde(default)]
    gateway: GatewayConfig,
    /// Model identifiers
    #[serde(default)]
    models: ModelsConfig,
    /// Prompt template source and cache
    #[serde(default)]
    prompts: PromptsConfig,
    /// Edit proxy
    #[serde(default)]
    proxy: ProxyConfig,
    /// HTTP server
    #[serde(default)]
    server: ServerConfig,
    /// Draft count and length threshold
    #[serde(default)]
    pipeline: PipelineConfig,
    /// Edit animation timing
    #[serde(default)]
    animation: AnimationConfig,
}

impl DraftsmithConfig {
    /// Load with the full precedence chain.
    ///
    /// # Errors
    ///
    /// A source that exists but cannot be read or parsed.
    #[instrument]
    pub fn load() -> DraftsmithResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder = Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/draftsmith/draftsmith.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("draftsmith").required(false))
            .add_source(environment());

        Self::finish(builder)
    }

    /// Load bundled defaults overlaid with one explicit file and the environment.
    ///
    /// # Errors
    ///
    /// The file is missing or does not parse.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> DraftsmithResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .add_source(environment());

        Self::finish(builder)
    }

    /// Parse a TOML document on top of the bundled defaults.
    ///
    /// # Errors
    ///
    /// The document does not parse.
    pub fn from_toml_str(content: &str) -> DraftsmithResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(content, FileFormat::Toml));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> DraftsmithResult<Self> {
        builder
            .build()
            .map_err(|e| {
                DraftsmithError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                DraftsmithError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Pipeline settings with the configured stage models.
    pub fn pipeline_config(&self) -> PipelineConfig {
        self.pipeline.clone().with_models(self.models.stages.clone())
    }

    /// Prompt cache settings.
    pub fn cache_config(&self) -> PromptCacheConfig {
        PromptCacheConfig::default().with_ttl_secs(self.prompts.ttl_secs)
    }

    /// Same config with the proxy base URL replaced.
    pub fn with_proxy_base_url(mut self, base_url: Option<String>) -> Self {
        self.proxy.base_url = base_url;
        self
    }

    /// Same config listening on `bind`.
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.server.bind = bind.into();
        self
    }
}

fn environment() -> Environment {
    Environment::with_prefix("DRAFTSMITH")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftsmith_core::ModelPreference;

    #[test]
    fn test_bundled_defaults() {
        let config = DraftsmithConfig::from_toml_str("").unwrap();
        assert_eq!(config.gateway().api_key_env(), "PERPLEXITY_API_KEY");
        assert_eq!(config.models().stages().posts(), "sonar-pro");
        assert_eq!(config.models().edit().for_preference(ModelPreference::Quality), "sonar-reasoning-pro");
        assert_eq!(*config.prompts().ttl_secs(), 300);
        assert!(config.proxy().base_url().is_none());
        assert_eq!(*config.pipeline().max_drafts(), 4);
        assert_eq!(*config.animation().step_delay_ms(), 20);
    }

    #[test]
    fn test_overrides_merge_with_defaults() {
        let config = DraftsmithConfig::from_toml_str(
            r#"
            [models]
            posts = "custom-posts"

            [prompts]
            ttl_secs = 60
            file = "prompts.toml"

            [proxy]
            base_url = "http://localhost:3000"

            [pipeline]
            max_drafts = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.models().stages().posts(), "custom-posts");
        assert_eq!(config.models().stages().topics(), "sonar");
        assert_eq!(config.cache_config().ttl().as_secs(), 60);
        assert_eq!(config.prompts().file().as_deref(), Some(Path::new("prompts.toml")));
        assert_eq!(config.proxy().base_url().as_deref(), Some("http://localhost:3000"));

        let pipeline = config.pipeline_config();
        assert_eq!(pipeline.draft_limit(), 2);
        assert_eq!(*pipeline.min_post_chars(), 50);
        assert_eq!(pipeline.models().posts(), "custom-posts");
    }

    #[test]
    fn test_invalid_document_is_config_error() {
        let err = DraftsmithConfig::from_toml_str("[pipeline]\nmax_drafts = \"many\"").unwrap_err();
        assert!(err.to_string().contains("Configuration"));
    }
}
