//! Prompt template caching for Draftsmith.
//!
//! [`PromptCache`] holds the last complete [`PromptSet`](draftsmith_core::PromptSet)
//! fetched from a [`PromptStore`](draftsmith_interface::PromptStore) and refreshes it
//! once the TTL has elapsed. [`TomlPromptStore`] serves templates from a local file.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod toml_store;

pub use cache::{PromptCache, PromptCacheConfig, PromptCacheConfigBuilder};
pub use toml_store::TomlPromptStore;
