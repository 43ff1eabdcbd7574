//! Draftsmith CLI binary.
//!
//! This binary provides command-line access to Draftsmith's functionality:
//! - Serve the HTTP API
//! - Generate drafts from an article file or a URL
//! - Summarize URLs, suggest topics and find articles
//! - Revise a draft, optionally animating the change

use clap::Parser;
use draftsmith::observability::{ObservabilityConfig, init_observability};
use draftsmith::{Draftsmith, DraftsmithConfig};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_articles, run_edit, run_generate, run_serve, run_summarize, run_topics};

    // Provider keys usually live in .env during development
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::default().with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability(observability)?;

    let config = match &cli.config {
        Some(path) => DraftsmithConfig::from_file(path)?,
        None => DraftsmithConfig::load()?,
    };

    // Execute the requested command
    match cli.command {
        Commands::Serve { bind } => {
            let config = match bind {
                Some(bind) => config.with_bind(bind),
                None => config,
            };
            run_serve(&Draftsmith::from_config(config)).await?;
        }

        Commands::Generate {
            article_json,
            url,
            industry,
            topic,
        } => {
            let app = Draftsmith::from_config(config);
            run_generate(&app, article_json.as_deref(), url, industry, topic).await?;
        }

        Commands::Summarize { url } => {
            run_summarize(&Draftsmith::from_config(config), &url).await?;
        }

        Commands::Topics { industry } => {
            run_topics(&Draftsmith::from_config(config), &industry).await?;
        }

        Commands::Articles { industry, topic } => {
            run_articles(&Draftsmith::from_config(config), &industry, &topic).await?;
        }

        Commands::Edit {
            text,
            instruction,
            model_preference,
            animate,
            proxy,
        } => {
            let app = Draftsmith::from_config(config);
            run_edit(&app, text, instruction, model_preference, animate, proxy).await?;
        }
    }

    Ok(())
}
