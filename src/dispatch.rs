//! Provider dispatch: resolve configuration, build the driver, send the prompt.

use std::sync::Arc;
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::config::{ConfigSource, EnvSource, ProviderConfig, PROVIDER_ENV};
use crate::drivers::DriverContext;
use crate::error::ErrorContext;
use crate::registry::{ProviderEntry, ProviderRegistry};
use crate::transport::HttpTransport;
use crate::types::AnswerResult;
use crate::{Error, Result};

/// Sends prompts to whichever provider the configuration selects.
///
/// Configuration is re-read on every [`query`](Self::query); the registry and
/// the HTTP transport are shared and read-only.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ProviderRegistry>,
    source: Arc<dyn ConfigSource>,
    transport: Arc<HttpTransport>,
    provider_override: Option<String>,
}

impl Dispatcher {
    pub fn new(source: Arc<dyn ConfigSource>) -> Result<Self> {
        let transport = HttpTransport::new().map_err(|e| {
            Error::configuration_with_context(
                "failed to build HTTP client",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("http_transport"),
            )
        })?;
        Ok(Self {
            registry: Arc::new(ProviderRegistry::with_defaults()),
            source,
            transport: Arc::new(transport),
            provider_override: None,
        })
    }

    /// Dispatcher over the process environment.
    pub fn from_env() -> Result<Self> {
        Self::new(Arc::new(EnvSource))
    }

    pub fn with_registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn with_transport(mut self, transport: HttpTransport) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    /// Use `name` instead of the `LLM_PROVIDER` setting.
    pub fn with_provider(mut self, name: impl Into<String>) -> Self {
        self.provider_override = Some(name.into());
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// The provider the next [`query`](Self::query) would use.
    pub fn selected_provider(&self) -> Result<&ProviderEntry> {
        let raw = match &self.provider_override {
            Some(name) => Some(name.clone()),
            None => self.source.get(PROVIDER_ENV),
        };
        self.registry.resolve(raw.as_deref())
    }

    /// Resolved settings for the selected provider.
    pub fn provider_config(&self) -> Result<ProviderConfig> {
        let entry = self.selected_provider()?;
        Ok(ProviderConfig::resolve(&entry.defaults, self.source.as_ref()))
    }

    /// Send `prompt` to the selected provider.
    ///
    /// All-or-nothing: either the answer with its raw payload, or an error.
    /// Nothing is retried.
    pub async fn query(&self, prompt: &str) -> Result<AnswerResult> {
        let entry = self.selected_provider()?;
        let config = ProviderConfig::resolve(&entry.defaults, self.source.as_ref());
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("dispatch", provider = %config.name, request_id = %request_id);

        let driver = entry.create_driver(
            DriverContext::new(config, self.transport.clone()).with_request_id(request_id),
        );

        async move {
            let result = driver.send_prompt(prompt).await?;
            info!(answer_chars = result.answer.chars().count(), "provider answered");
            Ok::<_, Error>(result)
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("provider_override", &self.provider_override)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapSource;

    fn dispatcher(source: MapSource) -> Dispatcher {
        Dispatcher::new(Arc::new(source)).unwrap()
    }

    #[test]
    fn test_selector_read_from_source() {
        let d = dispatcher(MapSource::new().with("LLM_PROVIDER", " GROQ "));
        assert_eq!(d.selected_provider().unwrap().name(), "groq");
    }

    #[test]
    fn test_override_wins_over_source() {
        let d = dispatcher(MapSource::new().with("LLM_PROVIDER", "groq")).with_provider("gemini");
        assert_eq!(d.selected_provider().unwrap().name(), "gemini");
    }

    #[test]
    fn test_provider_config_uses_selected_defaults() {
        let d = dispatcher(
            MapSource::new()
                .with("LLM_PROVIDER", "groq")
                .with("GROQ_MODEL", "mixtral"),
        );
        let cfg = d.provider_config().unwrap();
        assert_eq!(cfg.name, "groq");
        assert_eq!(cfg.model, "mixtral");
        assert_eq!(cfg.base_url, "https://api.groq.com/openai/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_query_without_key_is_missing_credential() {
        let d = dispatcher(MapSource::new().with("LLM_PROVIDER", "groq"));
        let err = d.query("prompt").await.unwrap_err();
        assert!(matches!(err, Error::MissingCredential { ref provider, .. } if provider == "groq"));
    }
}
