//! Generation pipeline, response extraction and edit dispatch for Draftsmith.
//!
//! [`GenerationPipeline`] sequences the LLM calls for a run (URL summary, then
//! post drafting; topic and article search on their own) and routes every reply
//! through [`ResponseExtractor`]. [`EditDispatcher`] is the gateway-backed
//! [`EditService`](draftsmith_interface::EditService).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod edit;
mod extract;
mod pipeline;
mod render;
mod timing;

pub use config::{EditModels, PipelineConfig, PipelineConfigBuilder, StageModels};
pub use edit::EditDispatcher;
pub use extract::{FreeTextGrammar, ResponseExtractor, parse_json_object, strip_fences};
pub use pipeline::GenerationPipeline;
pub use render::{default_template, render, template_body};
pub use timing::{GenerationReport, StageTiming};
