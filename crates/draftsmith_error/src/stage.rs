//! Pipeline stage tags attached to errors for diagnosability.

/// One logical step of the generation or edit flow.
///
/// # Examples
///
/// ```
/// use draftsmith_error::Stage;
///
/// assert_eq!(Stage::UrlSummary.to_string(), "url summary");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum Stage {
    /// Suggesting topics for an industry
    #[display("topic generation")]
    TopicGeneration,
    /// Searching articles for a topic
    #[display("article search")]
    ArticleSearch,
    /// Summarizing an arbitrary URL into an article
    #[display("url summary")]
    UrlSummary,
    /// Drafting the candidate posts
    #[display("post generation")]
    PostGeneration,
    /// Revising a draft from a natural-language instruction
    #[display("edit")]
    Edit,
    /// Refreshing prompt templates from the template store
    #[display("prompt refresh")]
    PromptRefresh,
}
