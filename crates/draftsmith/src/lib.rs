//! Draftsmith - LLM-assisted social post drafting
//!
//! Draftsmith turns a news article (or any URL) into a handful of LinkedIn post
//! drafts, and revises a draft on request, replaying the revision as an
//! incremental animation.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use draftsmith::{Draftsmith, DraftsmithConfig, GenerationRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = Draftsmith::from_config(DraftsmithConfig::load()?);
//!     let request = GenerationRequest::Url {
//!         url: "https://example.com/story".into(),
//!         industry: "Tech".into(),
//!         topic_label: "AI".into(),
//!     };
//!     for draft in app.pipeline().generate(&request).await?.as_slice() {
//!         println!("{draft}\n");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `draftsmith_error` - Error types and pipeline stages
//! - `draftsmith_core` - Data model
//! - `draftsmith_interface` - Gateway, prompt store and edit service traits
//! - `draftsmith_models` - Chat-completion gateway, HTTP prompt store, edit proxy
//! - `draftsmith_cache` - Prompt cache and TOML prompt store
//! - `draftsmith_pipeline` - Response extraction, generation pipeline, edit dispatch
//! - `draftsmith_diff` - Change set validation and edit animation
//!
//! This crate re-exports everything and adds configuration, the HTTP API and
//! edit sessions.
//!
//! # Cargo Features
//!
//! - `observability` - OpenTelemetry stdout exporters for spans and LLM metrics

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod app;
mod config;
pub mod observability;
mod prompts;
mod session;

pub use api::{ApiError, ApiState, GeneratePostsBody, SummarizeBody, TopicsBody, create_router};
pub use app::Draftsmith;
pub use config::{DraftsmithConfig, GatewayConfig, ModelsConfig, PromptsConfig, ProxyConfig, ServerConfig};
pub use prompts::BuiltinPromptStore;
pub use session::{EditSession, SessionEdit};

pub use draftsmith_cache::*;
pub use draftsmith_core::*;
pub use draftsmith_diff::*;
pub use draftsmith_error::*;
pub use draftsmith_interface::*;
pub use draftsmith_models::*;
pub use draftsmith_pipeline::*;
