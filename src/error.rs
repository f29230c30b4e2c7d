use crate::transport::TransportError;
use serde_json::Value;
use thiserror::Error;

/// Structured error context for configuration problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Configuration key that caused the error (e.g., "OPENAI_BASE_URL")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the rejected value)
    pub details: Option<String>,
    /// Component that raised the error (e.g., "settings", "gemini_client")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Every failure a question/answer exchange can end in.
///
/// Front ends render the `Display` form directly, so messages are written for
/// the person asking the question, not for a log parser.
#[derive(Debug, Error)]
pub enum Error {
    /// Empty or whitespace-only question. Raised before any network activity.
    #[error("{message}")]
    InvalidInput { message: String },

    /// No API key configured for the selected provider.
    #[error("Missing API key for provider '{provider}'. Set {env_var}.")]
    MissingCredential { provider: String, env_var: String },

    /// Connection failure, timeout, non-success status, or a failed vendor client call.
    #[error("HTTP error while contacting {provider}: {source}")]
    Transport {
        provider: String,
        #[source]
        source: TransportError,
    },

    /// Success status but the payload lacks the expected answer fields.
    #[error("Unexpected response structure from {provider}: {raw}")]
    MalformedResponse { provider: String, raw: Value },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput {
            message: msg.into(),
        }
    }

    pub fn missing_credential(provider: impl Into<String>, env_var: impl Into<String>) -> Self {
        Error::MissingCredential {
            provider: provider.into(),
            env_var: env_var.into(),
        }
    }

    pub fn transport(provider: impl Into<String>, source: TransportError) -> Self {
        Error::Transport {
            provider: provider.into(),
            source,
        }
    }

    pub fn malformed(provider: impl Into<String>, raw: Value) -> Self {
        Error::MalformedResponse {
            provider: provider.into(),
            raw,
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Name of the provider involved, when the error came from dispatch.
    pub fn provider(&self) -> Option<&str> {
        match self {
            Error::MissingCredential { provider, .. }
            | Error::Transport { provider, .. }
            | Error::MalformedResponse { provider, .. } => Some(provider),
            _ => None,
        }
    }
}
