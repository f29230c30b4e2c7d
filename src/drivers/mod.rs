//! Provider driver abstraction layer.
//!
//! Each provider integration implements [`ProviderDriver`]; the
//! [`ProviderRegistry`](crate::registry::ProviderRegistry) maps provider names
//! to driver factories and the dispatcher only ever sees `Box<dyn ProviderDriver>`.

pub mod gemini;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::config::ProviderConfig;
use crate::error::{Error, ErrorContext};
use crate::transport::HttpTransport;
use crate::types::{AnswerResult, Message};
use crate::Result;

pub use gemini::{
    GeminiClient, GeminiDriver, GenerateContentError, GenerateContentResponse, GenerativeModel,
};

/// Sampling temperature sent with every chat-completion request.
pub const TEMPERATURE: f64 = 0.2;

/// System message sent ahead of the prompt on chat-completion providers.
pub const TUTOR_PERSONA: &str = "You are a precise and student-friendly AI tutor. \
Explain concepts with short paragraphs and, when helpful, bullet lists.";

/// Wire format a driver speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiStyle {
    /// `POST /chat/completions` with bearer auth (OpenAI, Groq, and friends).
    OpenAiCompatible,
    /// Google `models/{model}:generateContent` through [`GeminiClient`].
    GeminiGenerate,
}

/// Everything a driver needs for one dispatch.
#[derive(Debug, Clone)]
pub struct DriverContext {
    pub config: ProviderConfig,
    pub transport: Arc<HttpTransport>,
    /// Correlation id for the exchange, forwarded as `x-request-id`.
    pub request_id: Option<String>,
}

impl DriverContext {
    pub fn new(config: ProviderConfig, transport: Arc<HttpTransport>) -> Self {
        Self {
            config,
            transport,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

/// Sends a prompt to one provider and normalizes the reply.
///
/// Implementations must fail with [`Error::MissingCredential`] before any
/// network activity when no API key is configured, and must never return a
/// partial [`AnswerResult`].
#[async_trait]
pub trait ProviderDriver: Send + Sync + std::fmt::Debug {
    /// Provider name this driver was created for (e.g. `"groq"`).
    fn provider_id(&self) -> &str;

    fn api_style(&self) -> ApiStyle;

    async fn send_prompt(&self, prompt: &str) -> Result<AnswerResult>;
}

/// Parse a configured endpoint, reporting which provider it belongs to.
pub(crate) fn parse_endpoint(config: &ProviderConfig) -> Result<Url> {
    Url::parse(&config.base_url).map_err(|e| {
        Error::configuration_with_context(
            format!("invalid endpoint for provider '{}'", config.name),
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(format!("{} ({})", config.base_url, e))
                .with_source(config.name.clone()),
        )
    })
}

pub(crate) fn require_api_key(config: &ProviderConfig) -> Result<&str> {
    config
        .api_key
        .as_deref()
        .ok_or_else(|| Error::missing_credential(&config.name, &config.api_key_var))
}

/// OpenAI-compatible chat-completions driver. Serves `openai` and `groq`.
#[derive(Debug)]
pub struct OpenAiDriver {
    config: ProviderConfig,
    transport: Arc<HttpTransport>,
    request_id: Option<String>,
}

impl OpenAiDriver {
    pub fn new(ctx: DriverContext) -> Self {
        Self {
            config: ctx.config,
            transport: ctx.transport,
            request_id: ctx.request_id,
        }
    }

    /// Chat-completion body: model, fixed temperature, persona + prompt.
    pub fn build_request(&self, prompt: &str) -> Value {
        serde_json::json!({
            "model": self.config.model,
            "temperature": TEMPERATURE,
            "messages": [Message::system(TUTOR_PERSONA), Message::user(prompt)],
        })
    }

    /// Extract `choices[0].message.content`, trimmed.
    pub fn parse_response(&self, body: &Value) -> Result<AnswerResult> {
        let content = body
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::malformed(&self.config.name, body.clone()))?;

        Ok(AnswerResult::new(content.trim(), body.clone()))
    }
}

#[async_trait]
impl ProviderDriver for OpenAiDriver {
    fn provider_id(&self) -> &str {
        &self.config.name
    }

    fn api_style(&self) -> ApiStyle {
        ApiStyle::OpenAiCompatible
    }

    async fn send_prompt(&self, prompt: &str) -> Result<AnswerResult> {
        let api_key = require_api_key(&self.config)?;
        let url = parse_endpoint(&self.config)?;
        let body = self.build_request(prompt);

        debug!(provider = %self.config.name, model = %self.config.model, "sending chat completion");

        let text = self
            .transport
            .post_json(url, Some(api_key), self.request_id.as_deref(), &body)
            .await
            .map_err(|e| {
                warn!(provider = %self.config.name, error = %e, "chat completion failed");
                Error::transport(&self.config.name, e)
            })?;

        let data: Value = serde_json::from_str(&text)
            .map_err(|_| Error::malformed(&self.config.name, Value::String(text.clone())))?;

        self.parse_response(&data)
    }
}

/// Create the built-in driver for an API style.
pub fn create_driver(api_style: ApiStyle, ctx: DriverContext) -> Box<dyn ProviderDriver> {
    match api_style {
        ApiStyle::OpenAiCompatible => Box::new(OpenAiDriver::new(ctx)),
        ApiStyle::GeminiGenerate => Box::new(GeminiDriver::new(ctx)),
    }
}
