//! tutor-web: single-page web form in front of the LLM tutor.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tutor_qa::{Dispatcher, TutorClient};

#[derive(Parser, Debug)]
#[command(name = "tutor-web", version, about = "Web form for asking the LLM tutor")]
struct Args {
    /// Address to bind the HTTP server to (host:port)
    #[arg(long, env = "TUTOR_BIND", default_value = "127.0.0.1:5000")]
    bind: String,

    /// Provider to use (openai, groq, gemini); overrides LLM_PROVIDER
    #[arg(long)]
    provider: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tutor_qa::config::load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut dispatcher = Dispatcher::from_env().context("failed to initialize provider dispatch")?;
    if let Some(provider) = args.provider {
        dispatcher = dispatcher.with_provider(provider);
    }
    if let Ok(entry) = dispatcher.selected_provider() {
        tracing::info!(provider = entry.name(), "provider selected");
    }

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;

    tutor_qa::web::serve(listener, Arc::new(TutorClient::new(dispatcher)))
        .await
        .context("server shutdown")?;

    Ok(())
}
