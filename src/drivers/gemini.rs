//! Google Gemini generateContent driver.
//!
//! Gemini is integrated through a dedicated client object rather than the raw
//! chat-completions request path:
//! - [`GeminiClient`] holds the API key and base URL. It is built per dispatch
//!   and owned by the driver; there is no process-wide client configuration.
//! - [`GenerativeModel`] is a model handle borrowed from the client.
//! - [`GenerativeModel::generate_content`] issues a single call with the prompt
//!   as the only input and returns a [`GenerateContentResponse`].
//! - The API key travels as the `?key=` query parameter, not in headers.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::config::ProviderConfig;
use crate::error::{Error, ErrorContext};
use crate::transport::{HttpTransport, TransportError};
use crate::types::AnswerResult;
use crate::Result;

use super::{require_api_key, ApiStyle, DriverContext, ProviderDriver};

/// Failure of a `generateContent` call.
#[derive(Debug, thiserror::Error)]
pub enum GenerateContentError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The call succeeded but the body was not JSON.
    #[error("generateContent returned a non-JSON body")]
    InvalidBody(String),
}

/// Explicitly constructed Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: Url,
    transport: Arc<HttpTransport>,
    request_id: Option<String>,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        transport: Arc<HttpTransport>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            Error::configuration_with_context(
                "invalid Gemini base URL",
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(format!("{} ({})", base_url, e))
                    .with_source("gemini_client"),
            )
        })?;

        Ok(Self {
            api_key: api_key.into(),
            base_url,
            transport,
            request_id: None,
        })
    }

    pub fn with_request_id(mut self, id: Option<String>) -> Self {
        self.request_id = id;
        self
    }

    pub fn generative_model(&self, model: impl Into<String>) -> GenerativeModel<'_> {
        GenerativeModel {
            client: self,
            model: model.into(),
        }
    }
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}

/// Handle for one Gemini model.
#[derive(Debug)]
pub struct GenerativeModel<'a> {
    client: &'a GeminiClient,
    model: String,
}

impl GenerativeModel<'_> {
    pub fn name(&self) -> &str {
        &self.model
    }

    /// `<base>/models/<model>:generateContent?key=<api key>`
    fn endpoint(&self) -> std::result::Result<Url, TransportError> {
        let base = self.client.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/models/{}:generateContent", base, self.model))
            .map_err(|e| TransportError::Other(format!("invalid generateContent URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("key", &self.client.api_key);
        Ok(url)
    }

    /// Single-turn generation with `prompt` as the only content.
    pub async fn generate_content(
        &self,
        prompt: &str,
    ) -> std::result::Result<GenerateContentResponse, GenerateContentError> {
        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
        });

        let text = self
            .client
            .transport
            .post_json(
                self.endpoint()?,
                None,
                self.client.request_id.as_deref(),
                &body,
            )
            .await?;

        let raw: Value =
            serde_json::from_str(&text).map_err(|_| GenerateContentError::InvalidBody(text))?;

        Ok(GenerateContentResponse::from_value(raw))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(rename = "finishReason", default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

/// Response of a `generateContent` call.
///
/// Keeps the decoded JSON verbatim; typed accessors read from it without
/// rejecting unknown or missing fields.
#[derive(Debug, Clone)]
pub struct GenerateContentResponse {
    raw: Value,
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    pub fn from_value(raw: Value) -> Self {
        // { candidates: [{ content: { parts: [{text: "..."}] }, finishReason }], usageMetadata }
        let candidates = raw
            .get("candidates")
            .cloned()
            .and_then(|c| serde_json::from_value(c).ok())
            .unwrap_or_default();
        Self { raw, candidates }
    }

    /// Concatenated text parts of the first candidate, `None` when it has none.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }

    pub fn into_value(self) -> Value {
        self.raw
    }
}

impl fmt::Display for GenerateContentResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Driver for the `gemini` provider.
#[derive(Debug)]
pub struct GeminiDriver {
    config: ProviderConfig,
    transport: Arc<HttpTransport>,
    request_id: Option<String>,
}

impl GeminiDriver {
    pub fn new(ctx: DriverContext) -> Self {
        Self {
            config: ctx.config,
            transport: ctx.transport,
            request_id: ctx.request_id,
        }
    }
}

#[async_trait]
impl ProviderDriver for GeminiDriver {
    fn provider_id(&self) -> &str {
        &self.config.name
    }

    fn api_style(&self) -> ApiStyle {
        ApiStyle::GeminiGenerate
    }

    async fn send_prompt(&self, prompt: &str) -> Result<AnswerResult> {
        let api_key = require_api_key(&self.config)?;
        let client = GeminiClient::new(api_key, &self.config.base_url, self.transport.clone())?
            .with_request_id(self.request_id.clone());
        let model = client.generative_model(self.config.model.as_str());

        debug!(provider = %self.config.name, model = model.name(), "generating content");

        let response = match model.generate_content(prompt).await {
            Ok(response) => response,
            Err(GenerateContentError::Transport(e)) => {
                warn!(provider = %self.config.name, error = %e, "generateContent failed");
                return Err(Error::transport(&self.config.name, e));
            }
            Err(GenerateContentError::InvalidBody(body)) => {
                return Err(Error::malformed(&self.config.name, Value::String(body)));
            }
        };

        let Some(answer) = response.text() else {
            warn!(
                provider = %self.config.name,
                finish_reason = response.finish_reason().unwrap_or("none"),
                "generateContent returned no text"
            );
            return Err(Error::malformed(
                &self.config.name,
                Value::String(response.to_string()),
            ));
        };

        Ok(AnswerResult::new(answer.trim(), response.into_value()))
    }
}
