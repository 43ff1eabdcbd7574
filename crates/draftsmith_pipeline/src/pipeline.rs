//! The generation pipeline: topics, articles, URL summaries and post drafts.

use crate::render::{URL_SUMMARY, render, template_body};
use crate::{GenerationReport, PipelineConfig, ResponseExtractor, StageTiming};
use chrono::Utc;
use draftsmith_cache::PromptCache;
use draftsmith_core::{
    ArticleRef, ArticleSummary, ChatMessage, DraftSet, GenerationRequest, PromptRole, PromptSet,
    TopicSuggestion, validate_url,
};
use draftsmith_error::{DraftsmithError, DraftsmithResult, Stage};
use draftsmith_interface::LlmGateway;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Drives every generation stage through the gateway and the extractor.
///
/// The pipeline never invents content: a run yields a complete [`DraftSet`] or a
/// stage-tagged error, and the caller decides whether to show canned drafts.
pub struct GenerationPipeline {
    gateway: Arc<dyn LlmGateway>,
    prompts: Arc<PromptCache>,
    config: PipelineConfig,
    extractor: ResponseExtractor,
}

impl GenerationPipeline {
    /// Create a pipeline.
    pub fn new(gateway: Arc<dyn LlmGateway>, prompts: Arc<PromptCache>, config: PipelineConfig) -> Self {
        let extractor = ResponseExtractor::new(*config.min_post_chars(), config.draft_limit());
        Self {
            gateway,
            prompts,
            config,
            extractor,
        }
    }

    /// Pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Draft posts for a request.
    pub async fn generate(&self, request: &GenerationRequest) -> DraftsmithResult<DraftSet> {
        Ok(self.generate_with_report(request).await?.into_drafts())
    }

    /// Draft posts and report the article used and per-stage timings.
    ///
    /// Input is validated before any gateway call. The `url` kind summarizes the
    /// page first and drafts from a synthetic article.
    #[instrument(
        skip(self, request),
        fields(kind = request.kind_name(), industry = request.industry(), topic = request.topic_label())
    )]
    pub async fn generate_with_report(
        &self,
        request: &GenerationRequest,
    ) -> DraftsmithResult<GenerationReport> {
        request.validate()?;

        let prompts = self.prompts.get_prompt_set().await;
        let mut timings = Vec::new();

        let article = match request {
            GenerationRequest::Topic { article, .. } => article.clone(),
            GenerationRequest::Url { url, .. } => {
                let summary = self.summarize_with(&prompts, url, &mut timings).await?;
                ArticleRef::from_url_summary(url.trim(), &summary)
            }
        };

        let drafts = self
            .draft_posts(&prompts, &article, request.industry(), request.topic_label(), &mut timings)
            .await?;

        info!(drafts = drafts.len(), stages = timings.len(), "Generation complete");
        Ok(GenerationReport::new(drafts, article, timings))
    }

    /// Summarize the page at `url` into `{title, summary}`.
    #[instrument(skip(self))]
    pub async fn summarize_url(&self, url: &str) -> DraftsmithResult<ArticleSummary> {
        validate_url(url)?;
        let prompts = self.prompts.get_prompt_set().await;
        self.summarize_with(&prompts, url.trim(), &mut Vec::new()).await
    }

    /// Topics professionals in `industry` are discussing.
    #[instrument(skip(self))]
    pub async fn suggest_topics(&self, industry: &str) -> DraftsmithResult<Vec<TopicSuggestion>> {
        let prompts = self.prompts.get_prompt_set().await;
        let prompt = render(
            &template_body(&prompts, PromptRole::TopicGeneration),
            &[("industry", industry)],
        );

        let raw = self
            .call_stage(
                Stage::TopicGeneration,
                self.config.models().topics(),
                self.messages(&prompts, prompt),
                &mut Vec::new(),
            )
            .await?;

        let topics = self
            .extractor
            .topics(&raw)
            .map_err(|e| DraftsmithError::from(e).at_stage(Stage::TopicGeneration))?;
        info!(topics = topics.len(), "Topics suggested");
        Ok(topics)
    }

    /// Articles about `topic` for `industry`.
    #[instrument(skip(self))]
    pub async fn search_articles(&self, industry: &str, topic: &str) -> DraftsmithResult<Vec<ArticleRef>> {
        let prompts = self.prompts.get_prompt_set().await;
        let prompt = render(
            &template_body(&prompts, PromptRole::ArticleSearch),
            &[("industry", industry), ("topic", topic)],
        );

        let raw = self
            .call_stage(
                Stage::ArticleSearch,
                self.config.models().articles(),
                self.messages(&prompts, prompt),
                &mut Vec::new(),
            )
            .await?;

        let articles = self
            .extractor
            .articles(&raw)
            .map_err(|e| DraftsmithError::from(e).at_stage(Stage::ArticleSearch))?;
        info!(articles = articles.len(), "Articles found");
        Ok(articles)
    }

    async fn summarize_with(
        &self,
        prompts: &PromptSet,
        url: &str,
        timings: &mut Vec<StageTiming>,
    ) -> DraftsmithResult<ArticleSummary> {
        let prompt = render(URL_SUMMARY, &[("url", url)]);
        let raw = self
            .call_stage(
                Stage::UrlSummary,
                self.config.models().summary(),
                self.messages(prompts, prompt),
                timings,
            )
            .await?;

        let summary = self
            .extractor
            .summary(&raw)
            .map_err(|e| DraftsmithError::from(e).at_stage(Stage::UrlSummary))?;
        debug!(title = %summary.title, "URL summarized");
        Ok(summary)
    }

    async fn draft_posts(
        &self,
        prompts: &PromptSet,
        article: &ArticleRef,
        industry: &str,
        topic: &str,
        timings: &mut Vec<StageTiming>,
    ) -> DraftsmithResult<DraftSet> {
        let count = self.config.draft_limit().to_string();
        let prompt = render(
            &template_body(prompts, PromptRole::PostGeneration),
            &[
                ("count", count.as_str()),
                ("industry", industry),
                ("topic", topic),
                ("title", article.title.as_str()),
                ("summary", article.summary.as_str()),
                ("source_url", article.source_url.as_str()),
                ("publication", article.publication.as_deref().unwrap_or("unknown publication")),
                ("author", article.author.as_deref().unwrap_or("unknown author")),
            ],
        );

        let raw = self
            .call_stage(
                Stage::PostGeneration,
                self.config.models().posts(),
                self.messages(prompts, prompt),
                timings,
            )
            .await?;

        let posts = self
            .extractor
            .posts(&raw)
            .map_err(|e| DraftsmithError::from(e).at_stage(Stage::PostGeneration))?;
        DraftSet::new(posts).map_err(|e| DraftsmithError::from(e).at_stage(Stage::PostGeneration))
    }

    fn messages(&self, prompts: &PromptSet, prompt: String) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(template_body(prompts, PromptRole::JsonModeSystem)),
            ChatMessage::user(prompt),
        ]
    }

    /// One gateway call, timed and stage-tagged.
    async fn call_stage(
        &self,
        stage: Stage,
        model: &str,
        messages: Vec<ChatMessage>,
        timings: &mut Vec<StageTiming>,
    ) -> DraftsmithResult<String> {
        let started_at = Utc::now();
        let result = self.gateway.call(model, &messages).await;
        let timing = StageTiming::new(stage, started_at, Utc::now());

        match &result {
            Ok(raw) => info!(
                %stage,
                model,
                provider = self.gateway.provider_name(),
                duration_ms = timing.duration_ms(),
                chars = raw.len(),
                "Stage call complete"
            ),
            Err(e) => error!(
                %stage,
                model,
                duration_ms = timing.duration_ms(),
                error = %e,
                "Stage call failed"
            ),
        }
        timings.push(timing);

        result.map_err(|e| e.at_stage(stage))
    }
}
