//! LLM provider and collaborator clients for Draftsmith.
//!
//! - [`ChatCompletionGateway`]: OpenAI-compatible chat-completion endpoint
//!   (OpenAI, Perplexity, Groq, a local server, ...).
//! - [`HttpPromptStore`]: read-only client of the prompt template store.
//! - [`ProxyEditClient`]: forwards edits to a same-origin `/api/edit-post` endpoint.
//!
//! ```no_run
//! use draftsmith_core::ChatMessage;
//! use draftsmith_interface::LlmGateway;
//! use draftsmith_models::ChatCompletionGateway;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = ChatCompletionGateway::new(
//!     "https://api.perplexity.ai/chat/completions",
//!     "PERPLEXITY_API_KEY",
//! );
//! let reply = gateway
//!     .call("sonar-pro", &[ChatMessage::user("Name three Rust web frameworks")])
//!     .await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chat;
mod gateway;
mod metrics;
mod prompt_store;
mod proxy;

pub use chat::{ChatChoice, ChatChoiceMessage, ChatCompletionRequest, ChatCompletionResponse, ChatUsage};
pub use gateway::ChatCompletionGateway;
pub use metrics::{LlmMetrics, classify_error};
pub use prompt_store::{HttpPromptStore, PromptDocument};
pub use proxy::ProxyEditClient;
