//! CLI command definitions.

use clap::{ArgGroup, Parser, Subcommand};
use draftsmith::ModelPreference;
use std::path::PathBuf;

/// Draftsmith - draft and revise LinkedIn posts with an LLM
#[derive(Parser, Debug)]
#[command(name = "draftsmith")]
#[command(about = "Draft and revise LinkedIn posts from news articles with an LLM", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file (defaults plus this file replace the search path)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Listen address (overrides server.bind)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Generate post drafts from an article or a URL
    #[command(group(ArgGroup::new("source").required(true).args(["article_json", "url"])))]
    Generate {
        /// JSON file holding the article ({id, title, summary, sourceUrl, ...})
        #[arg(long)]
        article_json: Option<PathBuf>,

        /// URL to summarize and write about
        #[arg(long)]
        url: Option<String>,

        /// Audience industry
        #[arg(long, default_value = "General")]
        industry: String,

        /// Topic label
        #[arg(long, default_value = "General")]
        topic: String,
    },

    /// Summarize the page at a URL
    Summarize {
        /// Page to summarize
        url: String,
    },

    /// Suggest topics for an industry
    Topics {
        /// Audience industry
        industry: String,
    },

    /// Find articles about a topic
    Articles {
        /// Audience industry
        industry: String,

        /// Topic to search for
        topic: String,
    },

    /// Revise a draft
    Edit {
        /// Current draft text
        #[arg(long)]
        text: String,

        /// What to change
        #[arg(long)]
        instruction: String,

        /// fastest, balanced or quality
        #[arg(long, default_value = "balanced")]
        model_preference: ModelPreference,

        /// Replay the revision frame by frame
        #[arg(long)]
        animate: bool,

        /// Send the edit through the configured same-origin proxy
        #[arg(long)]
        proxy: bool,
    },
}
