//! `{{name}}` placeholder rendering and the compiled-in fallback prompts.

use draftsmith_core::{PromptRole, PromptSet};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::{debug, warn};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("valid placeholder regex")
});

/// Replace every `{{name}}` with its value from `vars`.
///
/// Unknown placeholders are left verbatim.
///
/// # Examples
///
/// ```
/// use draftsmith_pipeline::render;
///
/// let text = render("Posts for {{industry}} about {{ topic }} ({{unknown}})", &[
///     ("industry", "Tech"),
///     ("topic", "AI"),
/// ]);
/// assert_eq!(text, "Posts for Tech about AI ({{unknown}})");
/// ```
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let name = &caps[1];
            match vars.iter().find(|(key, _)| *key == name) {
                Some((_, value)) => value.to_string(),
                None => {
                    debug!(placeholder = name, "Leaving unknown placeholder in prompt");
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}

/// Template body for `role`, falling back to the compiled-in default.
pub fn template_body(set: &PromptSet, role: PromptRole) -> Cow<'_, str> {
    match set.get(role) {
        Some(template) => Cow::Borrowed(template.body().as_str()),
        None => {
            warn!(role = role.key(), "Prompt template unavailable, using built-in default");
            Cow::Borrowed(default_template(role))
        }
    }
}

/// Compiled-in template for a role.
pub fn default_template(role: PromptRole) -> &'static str {
    match role {
        PromptRole::TopicGeneration => TOPIC_GENERATION,
        PromptRole::ArticleSearch => ARTICLE_SEARCH,
        PromptRole::PostGeneration => POST_GENERATION,
        PromptRole::JsonModeSystem => JSON_MODE_SYSTEM,
    }
}

const TOPIC_GENERATION: &str = "\
Suggest 6 timely topics that professionals in the {{industry}} industry are discussing on LinkedIn this month.
Return JSON of the form {\"topics\": [{\"label\": \"short topic name\", \"description\": \"one sentence\"}]}.";

const ARTICLE_SEARCH: &str = "\
Find 5 recent, reputable news articles about \"{{topic}}\" relevant to the {{industry}} industry.
Return JSON of the form {\"articles\": [{\"title\": \"...\", \"summary\": \"two sentences\", \"url\": \"https://...\", \"publication\": \"...\", \"author\": \"...\"}]}.";

const POST_GENERATION: &str = "\
Write {{count}} distinct LinkedIn post drafts for a professional in the {{industry}} industry, on the topic \"{{topic}}\".
Base them on this article:
Title: {{title}}
Summary: {{summary}}
Source: {{source_url}} ({{publication}}, {{author}})
Each post should open with a hook, add a personal insight and end with a question. Vary tone and structure.
Return JSON of the form {\"post1\": \"...\", \"post2\": \"...\", \"post3\": \"...\", \"post4\": \"...\"}.";

const JSON_MODE_SYSTEM: &str = "\
You are a helpful assistant that responds with valid JSON only. \
Do not wrap the JSON in markdown and do not add commentary before or after it.";

/// Prompt for URL summarization. Not stored in the template store.
pub(crate) const URL_SUMMARY: &str = "\
Read the article at {{url}}.
Return JSON of the form {\"title\": \"the article headline\", \"summary\": \"a 3-4 sentence summary of its key points\"}.";

/// System role of the edit dispatcher.
pub(crate) const EDITOR_SYSTEM: &str = "\
You are a professional LinkedIn post editor. \
Apply the user's instruction to their post and reply with the revised post only.";
