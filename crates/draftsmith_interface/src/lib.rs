//! Trait definitions for the Draftsmith post generation pipeline.
//!
//! These are the seams between the pipeline and its external collaborators:
//! the LLM provider, the prompt template store and the edit endpoint.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{EditService, LlmGateway, PromptStore};
