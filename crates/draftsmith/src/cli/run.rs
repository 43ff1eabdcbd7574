//! Command handlers.

use draftsmith::{
    ArticleRef, Draftsmith, DraftsmithResult, EditRequest, GenerationRequest, HttpError, InputError, InputErrorKind,
    JsonError, ModelPreference,
};
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};

/// Serve the HTTP API until interrupted.
#[instrument(skip(app))]
pub async fn run_serve(app: &Draftsmith) -> DraftsmithResult<()> {
    let bind = app.config().server().bind();
    let listener = tokio::net::TcpListener::bind(bind.as_str())
        .await
        .map_err(|e| HttpError::new(format!("Failed to bind {}: {}", bind, e)))?;
    info!(%bind, "Draftsmith API listening");

    axum::serve(listener, app.router())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .map_err(|e| HttpError::new(format!("Server error: {}", e)))?;
    Ok(())
}

/// Generate drafts and print them.
#[instrument(skip(app))]
pub async fn run_generate(
    app: &Draftsmith,
    article_json: Option<&Path>,
    url: Option<String>,
    industry: String,
    topic_label: String,
) -> DraftsmithResult<()> {
    let request = match (article_json, url) {
        (Some(path), _) => GenerationRequest::Topic {
            article: read_article(path).await?,
            industry,
            topic_label,
        },
        (None, Some(url)) => GenerationRequest::Url {
            url,
            industry,
            topic_label,
        },
        (None, None) => {
            return Err(InputError::new(InputErrorKind::MissingField("--article-json or --url".to_string())).into());
        }
    };

    let report = app.pipeline().generate_with_report(&request).await?;
    info!(total_ms = report.total_ms(), stages = report.timings().len(), "Generation finished");

    for (i, draft) in report.drafts().as_slice().iter().enumerate() {
        println!("--- Draft {} ---\n{}\n", i + 1, draft);
    }
    Ok(())
}

async fn read_article(path: &Path) -> DraftsmithResult<ArticleRef> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        InputError::new(InputErrorKind::Invalid(format!(
            "Cannot read {}: {}",
            path.display(),
            e
        )))
    })?;
    let article = serde_json::from_str(&content)
        .map_err(|e| JsonError::new(format!("Invalid article JSON in {}: {}", path.display(), e)))?;
    Ok(article)
}

/// Print a `{title, summary}` for a URL.
#[instrument(skip(app))]
pub async fn run_summarize(app: &Draftsmith, url: &str) -> DraftsmithResult<()> {
    let summary = app.pipeline().summarize_url(url).await?;
    println!("{}\n\n{}", summary.title, summary.summary);
    Ok(())
}

/// Print topic suggestions.
#[instrument(skip(app))]
pub async fn run_topics(app: &Draftsmith, industry: &str) -> DraftsmithResult<()> {
    for topic in app.pipeline().suggest_topics(industry).await? {
        println!("- {}: {}", topic.label, topic.description);
    }
    Ok(())
}

/// Print articles found for a topic.
#[instrument(skip(app))]
pub async fn run_articles(app: &Draftsmith, industry: &str, topic: &str) -> DraftsmithResult<()> {
    for article in app.pipeline().search_articles(industry, topic).await? {
        println!("- {} <{}>\n  {}", article.title, article.source_url, article.summary);
    }
    Ok(())
}

/// Revise a draft, optionally replaying the change in the terminal.
#[instrument(skip(app, text, instruction))]
pub async fn run_edit(
    app: &Draftsmith,
    text: String,
    instruction: String,
    model_preference: ModelPreference,
    animate: bool,
    proxy: bool,
) -> DraftsmithResult<()> {
    let session = if proxy { app.proxy_session()? } else { app.session() };
    let request = EditRequest::new(text, instruction).with_model_preference(model_preference);

    if animate {
        let mut stdout = std::io::stdout();
        session
            .edit(&request, |frame| {
                // Clear the screen and redraw; posts span several lines.
                let _ = write!(stdout, "\x1b[2J\x1b[H{}", frame.text);
                let _ = stdout.flush();
            })
            .await?;
        println!();
    } else {
        let (outcome, _) = session.prepare(&request).await?;
        println!("{}", outcome.text);
    }
    Ok(())
}
