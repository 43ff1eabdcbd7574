//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the draftsmith binary.

mod commands;
mod run;

pub use commands::{Cli, Commands};
pub use run::{run_articles, run_edit, run_generate, run_serve, run_summarize, run_topics};
