//! Resilient extraction of structured data from untrusted LLM replies.
//!
//! Replies are requested as JSON but never trusted to be JSON. The JSON path
//! strips literal code fences, parses, and validates the shape expected for the
//! stage. Post drafts additionally have a free-text fallback ([`FreeTextGrammar`])
//! that is tried once, against the same reply, when the JSON path reports a
//! malformed payload.

mod free_text;
mod json;

pub use free_text::FreeTextGrammar;
pub use json::{parse_json_object, strip_fences};

use draftsmith_core::{ArticleRef, ArticleSummary, EditOutcome, TopicSuggestion};
use draftsmith_error::{ExtractionError, ExtractionErrorKind, Stage};
use tracing::{debug, warn};

/// Shape-aware extractor for every pipeline stage.
///
/// # Examples
///
/// ```
/// use draftsmith_pipeline::ResponseExtractor;
///
/// let extractor = ResponseExtractor::new(10, 4);
/// let raw = "```json\n{\"post1\": \"A post that is long enough\", \"post2\": \"\"}\n```";
/// assert_eq!(extractor.posts_from_json(raw).unwrap(), vec!["A post that is long enough"]);
/// ```
#[derive(Debug, Clone)]
pub struct ResponseExtractor {
    min_post_chars: usize,
    max_posts: usize,
    grammar: FreeTextGrammar,
}

impl Default for ResponseExtractor {
    fn default() -> Self {
        Self::new(50, draftsmith_core::MAX_DRAFTS)
    }
}

impl ResponseExtractor {
    /// Posts must be longer than `min_post_chars` characters; at most `max_posts` are kept.
    pub fn new(min_post_chars: usize, max_posts: usize) -> Self {
        Self {
            min_post_chars,
            max_posts,
            grammar: FreeTextGrammar::new(min_post_chars, max_posts),
        }
    }

    /// Posts from `{"post1": .., "post4": ..}` (or `{"posts": [..]}`), in key order.
    ///
    /// # Errors
    ///
    /// [`ExtractionErrorKind::MalformedPayload`] when the reply is not a JSON object
    /// or no entry is long enough.
    pub fn posts_from_json(&self, raw: &str) -> Result<Vec<String>, ExtractionError> {
        let object = parse_json_object(raw, Stage::PostGeneration)?;

        let mut candidates: Vec<String> = (1..=self.max_posts.max(1))
            .filter_map(|n| object.get(&format!("post{}", n)))
            .filter_map(|value| value.as_str().map(str::to_string))
            .collect();

        if candidates.is_empty() {
            if let Some(posts) = object.get("posts").and_then(|v| v.as_array()) {
                candidates = posts
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect();
            }
        }

        let posts: Vec<String> = candidates
            .into_iter()
            .map(|post| post.trim().to_string())
            .filter(|post| is_substantial(post, self.min_post_chars))
            .take(self.max_posts)
            .collect();

        if posts.is_empty() {
            debug!("JSON reply parsed but held no substantial post");
            return Err(ExtractionError::malformed(Stage::PostGeneration, raw));
        }
        Ok(posts)
    }

    /// Posts recovered from prose by the free-text grammar.
    ///
    /// # Errors
    ///
    /// [`ExtractionErrorKind::NoExtractablePosts`] when nothing survives the rules.
    pub fn posts_from_free_text(&self, raw: &str) -> Result<Vec<String>, ExtractionError> {
        let posts = self.grammar.extract(raw);
        if posts.is_empty() {
            return Err(ExtractionError::new(ExtractionErrorKind::NoExtractablePosts));
        }
        Ok(posts)
    }

    /// JSON first, then a single free-text pass over the same reply.
    pub fn posts(&self, raw: &str) -> Result<Vec<String>, ExtractionError> {
        match self.posts_from_json(raw) {
            Ok(posts) => Ok(posts),
            Err(e) if matches!(e.kind, ExtractionErrorKind::MalformedPayload { .. }) => {
                warn!(error = %e, "Post reply was not usable JSON, falling back to free-text parsing");
                self.posts_from_free_text(raw)
            }
            Err(e) => Err(e),
        }
    }

    /// `{title, summary}` from a URL summarization reply.
    ///
    /// # Errors
    ///
    /// `MalformedPayload` when the reply is not a JSON object,
    /// `InvalidSummaryFormat` when either field is missing or blank.
    pub fn summary(&self, raw: &str) -> Result<ArticleSummary, ExtractionError> {
        let object = parse_json_object(raw, Stage::UrlSummary)?;
        let field = |name: &str| {
            object
                .get(name)
                .and_then(|v| v.as_str())
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        let summary = ArticleSummary {
            title: field("title"),
            summary: field("summary"),
        };
        if !summary.is_complete() {
            let missing = if summary.title.is_empty() { "title" } else { "summary" };
            return Err(ExtractionError::new(ExtractionErrorKind::InvalidSummaryFormat(format!(
                "'{}' is missing or empty",
                missing
            ))));
        }
        Ok(summary)
    }

    /// `{"topics": [{label, description}]}`; entries without a label are dropped.
    pub fn topics(&self, raw: &str) -> Result<Vec<TopicSuggestion>, ExtractionError> {
        let payload: json::TopicsPayload = json::parse_shape(raw, Stage::TopicGeneration)?;
        let topics: Vec<TopicSuggestion> = payload
            .topics
            .into_iter()
            .filter_map(|entry| {
                let label = entry.label.trim().to_string();
                if label.is_empty() {
                    debug!("Dropping topic without label");
                    return None;
                }
                Some(TopicSuggestion {
                    label,
                    description: entry.description.trim().to_string(),
                })
            })
            .collect();

        if topics.is_empty() {
            return Err(ExtractionError::new(ExtractionErrorKind::NoExtractableTopics));
        }
        Ok(topics)
    }

    /// `{"articles": [{title, summary, url, publication?, author?}]}`.
    ///
    /// Entries that fail validation are dropped; ids are `article-{n}` over the kept entries.
    pub fn articles(&self, raw: &str) -> Result<Vec<ArticleRef>, ExtractionError> {
        let payload: json::ArticlesPayload = json::parse_shape(raw, Stage::ArticleSearch)?;
        let articles: Vec<ArticleRef> = payload
            .articles
            .into_iter()
            .filter_map(|entry| match entry.into_article() {
                Ok(article) => Some(article),
                Err(e) => {
                    warn!(error = %e, "Dropping invalid article from search reply");
                    None
                }
            })
            .enumerate()
            .map(|(n, mut article)| {
                article.id = format!("article-{}", n + 1);
                article
            })
            .collect();

        if articles.is_empty() {
            return Err(ExtractionError::new(ExtractionErrorKind::NoExtractableArticles));
        }
        Ok(articles)
    }

    /// Edit reply as `{editedPost, diff?}` JSON or, failing that, plain text.
    ///
    /// # Errors
    ///
    /// [`ExtractionErrorKind::EmptyEditResult`] when no replacement text is present.
    pub fn edit(&self, raw: &str) -> Result<EditOutcome, ExtractionError> {
        let stripped = strip_fences(raw);

        if stripped.starts_with('{') {
            if let Ok(reply) = serde_json::from_str::<draftsmith_core::EditPostReply>(stripped) {
                if reply.edited_post.trim().is_empty() {
                    return Err(ExtractionError::new(ExtractionErrorKind::EmptyEditResult));
                }
                debug!(has_diff = reply.diff.is_some(), "Edit reply parsed as JSON");
                return Ok(EditOutcome {
                    text: reply.edited_post.trim().to_string(),
                    changes: reply.diff,
                });
            }
            debug!("Edit reply looked like JSON but did not parse, using it as text");
        }

        if stripped.is_empty() {
            return Err(ExtractionError::new(ExtractionErrorKind::EmptyEditResult));
        }
        Ok(EditOutcome {
            text: stripped.to_string(),
            changes: None,
        })
    }
}

/// Longer than `min_chars` characters once trimmed.
pub(crate) fn is_substantial(text: &str, min_chars: usize) -> bool {
    text.trim().chars().count() > min_chars
}
