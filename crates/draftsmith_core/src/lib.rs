//! Core data types for the Draftsmith post generation pipeline.
//!
//! This crate provides the data model shared by the pipeline, the diff engine
//! and the HTTP surface: generation requests, draft sets, edit requests,
//! change sets and prompt templates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod article;
mod change;
mod draft;
mod edit;
mod message;
mod prompt;
mod request;
mod role;

pub use article::{ArticleRef, ArticleRefBuilder, ArticleSummary, TopicSuggestion, validate_url};
pub use change::{Change, ChangeKind, ChangeSet, common_prefix};
pub use draft::{DraftSet, MAX_DRAFTS};
pub use edit::{EditOutcome, EditPostBody, EditPostReply, EditRequest, ModelPreference};
pub use message::ChatMessage;
pub use prompt::{PromptRole, PromptSet, PromptTemplate};
pub use request::GenerationRequest;
pub use role::Role;
