//! Pipeline configuration.

use derive_getters::Getters;
use draftsmith_core::{MAX_DRAFTS, ModelPreference};
use serde::{Deserialize, Serialize};

/// Model identifier per pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_", into)]
pub struct StageModels {
    /// Topic generation
    #[serde(default = "default_topics_model")]
    topics: String,
    /// Article search
    #[serde(default = "default_articles_model")]
    articles: String,
    /// URL summarization
    #[serde(default = "default_summary_model")]
    summary: String,
    /// Post drafting
    #[serde(default = "default_posts_model")]
    posts: String,
}

fn default_topics_model() -> String {
    "sonar".to_string()
}

fn default_articles_model() -> String {
    "sonar-pro".to_string()
}

fn default_summary_model() -> String {
    "sonar-pro".to_string()
}

fn default_posts_model() -> String {
    "sonar-pro".to_string()
}

impl Default for StageModels {
    fn default() -> Self {
        Self {
            topics: default_topics_model(),
            articles: default_articles_model(),
            summary: default_summary_model(),
            posts: default_posts_model(),
        }
    }
}

/// Edit model per [`ModelPreference`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_", into)]
pub struct EditModels {
    /// Lowest latency
    #[serde(default = "default_fastest")]
    fastest: String,
    /// Default trade-off
    #[serde(default = "default_balanced")]
    balanced: String,
    /// Best output
    #[serde(default = "default_quality")]
    quality: String,
}

fn default_fastest() -> String {
    "sonar".to_string()
}

fn default_balanced() -> String {
    "sonar-pro".to_string()
}

fn default_quality() -> String {
    "sonar-reasoning-pro".to_string()
}

impl Default for EditModels {
    fn default() -> Self {
        Self {
            fastest: default_fastest(),
            balanced: default_balanced(),
            quality: default_quality(),
        }
    }
}

impl EditModels {
    /// Model for a preference.
    pub fn for_preference(&self, preference: ModelPreference) -> &str {
        match preference {
            ModelPreference::Fastest => &self.fastest,
            ModelPreference::Balanced => &self.balanced,
            ModelPreference::Quality => &self.quality,
        }
    }
}

/// Configuration for [`GenerationPipeline`](crate::GenerationPipeline).
///
/// # Examples
///
/// ```
/// use draftsmith_pipeline::{PipelineConfig, PipelineConfigBuilder};
///
/// let config = PipelineConfigBuilder::default().max_drafts(2usize).build().unwrap();
/// assert_eq!(*config.max_drafts(), 2);
/// assert_eq!(*config.min_post_chars(), 50);
///
/// // Out-of-range values are clamped when used.
/// assert_eq!(PipelineConfig::default().with_max_drafts(9).draft_limit(), 4);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct PipelineConfig {
    /// Models per stage
    #[serde(default)]
    #[builder(default)]
    models: StageModels,
    /// Drafts requested per run (1-4)
    #[serde(default = "default_max_drafts")]
    #[builder(default = "default_max_drafts()")]
    max_drafts: usize,
    /// Posts must be longer than this many characters
    #[serde(default = "default_min_post_chars")]
    #[builder(default = "default_min_post_chars()")]
    min_post_chars: usize,
}

fn default_max_drafts() -> usize {
    MAX_DRAFTS
}

fn default_min_post_chars() -> usize {
    50
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            models: StageModels::default(),
            max_drafts: default_max_drafts(),
            min_post_chars: default_min_post_chars(),
        }
    }
}

impl PipelineConfig {
    /// `max_drafts` clamped to 1..=4.
    pub fn draft_limit(&self) -> usize {
        self.max_drafts.clamp(1, MAX_DRAFTS)
    }
}
