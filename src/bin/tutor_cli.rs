//! tutor-cli: ask an LLM tutor questions from the terminal.
//!
//! Usage:
//!   tutor-cli [--provider <name>] [--show-raw | --no-raw]
//!   tutor-cli --list-providers

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tutor_qa::cli::{self, RawDisplay};
use tutor_qa::{Dispatcher, TutorClient};

#[derive(Parser, Debug)]
#[command(
    name = "tutor-cli",
    version,
    about = "NLP question-and-answering CLI powered by an LLM API"
)]
struct Args {
    /// Provider to use (openai, groq, gemini); overrides LLM_PROVIDER
    #[arg(long)]
    provider: Option<String>,

    /// Print the raw provider response after every answer without asking
    #[arg(long, conflicts_with = "no_raw")]
    show_raw: bool,

    /// Never offer the raw provider response
    #[arg(long)]
    no_raw: bool,

    /// List registered providers and exit
    #[arg(long)]
    list_providers: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tutor_qa::config::load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut dispatcher = Dispatcher::from_env().context("failed to initialize provider dispatch")?;
    if let Some(provider) = args.provider {
        dispatcher = dispatcher.with_provider(provider);
    }

    if args.list_providers {
        let default = dispatcher.registry().default_provider();
        for name in dispatcher.registry().names() {
            if name == default {
                println!("{name} (default)");
            } else {
                println!("{name}");
            }
        }
        return Ok(());
    }

    let raw_display = if args.show_raw {
        RawDisplay::Always
    } else if args.no_raw {
        RawDisplay::Never
    } else {
        RawDisplay::Ask
    };

    let client = TutorClient::new(dispatcher);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    cli::run(&client, stdin.lock(), stdout.lock(), raw_display)
        .await
        .context("terminal I/O failed")?;

    Ok(())
}
