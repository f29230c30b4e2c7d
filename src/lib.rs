//! # tutor-qa
//!
//! Question-answering front ends over third-party LLM providers.
//!
//! ## Overview
//!
//! A question goes through three steps, shared by the interactive CLI and the
//! single-page web form:
//!
//! 1. **Normalize** ([`preprocess`]): trim, lowercase, tokenize, rejoin.
//! 2. **Build the prompt** ([`prompt`]): fixed tutor instructions plus the
//!    processed question.
//! 3. **Dispatch** ([`dispatch`]): pick the configured provider from the
//!    [`registry`], send the prompt through its [`drivers`] implementation,
//!    and return the answer together with the raw provider payload.
//!
//! ## Providers
//!
//! | Name | Style | Settings prefix |
//! |------|-------|-----------------|
//! | `openai` (default) | chat completions | `OPENAI_` |
//! | `groq` | chat completions | `GROQ_` |
//! | `gemini` | `generateContent` client | `GEMINI_` |
//!
//! The provider is selected with `LLM_PROVIDER`; each provider reads
//! `<PREFIX>_API_KEY` (required), `<PREFIX>_BASE_URL` and `<PREFIX>_MODEL`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tutor_qa::TutorClient;
//!
//! #[tokio::main]
//! async fn main() -> tutor_qa::Result<()> {
//!     let client = TutorClient::from_env()?;
//!     let exchange = client.ask("What is the capital of France?").await?;
//!     println!("{}", exchange.answer.answer);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod drivers;
pub mod error;
pub mod preprocess;
pub mod prompt;
pub mod registry;
pub mod transport;
pub mod types;
pub mod web;

pub use client::{Exchange, TutorClient};
pub use config::{ConfigSource, EnvSource, MapSource, ProviderConfig, ProviderDefaults};
pub use dispatch::Dispatcher;
pub use drivers::{ApiStyle, DriverContext, ProviderDriver};
pub use error::{Error, ErrorContext};
pub use preprocess::{preprocess_question, NormalizedQuestion};
pub use prompt::build_prompt;
pub use registry::ProviderRegistry;
pub use types::AnswerResult;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
