//! Provider registry: maps provider names to their defaults and driver factory.
//!
//! Adding a provider means registering one more entry; the dispatcher never
//! branches on provider names.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

use crate::config::{normalize_provider_name, ProviderDefaults, DEFAULT_PROVIDER};
use crate::drivers::{create_driver, ApiStyle, DriverContext, ProviderDriver};
use crate::error::{Error, ErrorContext};
use crate::Result;

/// Builds a driver for one dispatch.
pub type DriverFactory = Arc<dyn Fn(DriverContext) -> Box<dyn ProviderDriver> + Send + Sync>;

/// A registered provider.
#[derive(Clone)]
pub struct ProviderEntry {
    pub defaults: ProviderDefaults,
    factory: DriverFactory,
}

impl ProviderEntry {
    pub fn name(&self) -> &str {
        &self.defaults.name
    }

    pub fn create_driver(&self, ctx: DriverContext) -> Box<dyn ProviderDriver> {
        (self.factory)(ctx)
    }
}

impl fmt::Debug for ProviderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderEntry")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

/// Name → provider lookup with a fallback entry.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    entries: BTreeMap<String, ProviderEntry>,
    default_provider: String,
}

impl ProviderRegistry {
    /// Registry with no providers; `default_provider` must be registered
    /// before [`resolve`](Self::resolve) can succeed.
    pub fn empty(default_provider: impl Into<String>) -> Self {
        Self {
            entries: BTreeMap::new(),
            default_provider: default_provider.into(),
        }
    }

    /// `openai` (default), `groq`, and `gemini`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty(DEFAULT_PROVIDER);
        registry.register(ProviderDefaults::openai(), |ctx| {
            create_driver(ApiStyle::OpenAiCompatible, ctx)
        });
        registry.register(ProviderDefaults::groq(), |ctx| {
            create_driver(ApiStyle::OpenAiCompatible, ctx)
        });
        registry.register(ProviderDefaults::gemini(), |ctx| {
            create_driver(ApiStyle::GeminiGenerate, ctx)
        });
        registry
    }

    /// Register or replace a provider. The name is stored lowercased.
    pub fn register<F>(&mut self, mut defaults: ProviderDefaults, factory: F) -> &mut Self
    where
        F: Fn(DriverContext) -> Box<dyn ProviderDriver> + Send + Sync + 'static,
    {
        defaults.name = defaults.name.trim().to_lowercase();
        let entry = ProviderEntry {
            defaults,
            factory: Arc::new(factory),
        };
        self.entries.insert(entry.defaults.name.clone(), entry);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ProviderEntry> {
        self.entries.get(name)
    }

    pub fn default_provider(&self) -> &str {
        &self.default_provider
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Look up the provider for a raw selector value.
    ///
    /// The value is trimmed and lowercased and must match exactly. Unset,
    /// blank, and unrecognized values all select the default provider.
    pub fn resolve(&self, raw: Option<&str>) -> Result<&ProviderEntry> {
        let name = normalize_provider_name(raw);
        if let Some(entry) = self.entries.get(&name) {
            return Ok(entry);
        }

        if name != self.default_provider {
            warn!(requested = %name, fallback = %self.default_provider, "unknown provider, using default");
        }
        self.entries.get(&self.default_provider).ok_or_else(|| {
            Error::configuration_with_context(
                "default provider is not registered",
                ErrorContext::new()
                    .with_field_path(crate::config::PROVIDER_ENV)
                    .with_details(self.default_provider.clone())
                    .with_source("provider_registry"),
            )
        })
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
