//! Provider configuration resolved from environment-style settings.
//!
//! Nothing here is cached: [`ProviderConfig::resolve`] reads the source every
//! time it is called, so each exchange sees the configuration as it is at
//! dispatch time.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Selects the provider by name (`openai`, `groq`, `gemini`).
pub const PROVIDER_ENV: &str = "LLM_PROVIDER";

/// Provider used when the selector is unset, blank, or unrecognized.
pub const DEFAULT_PROVIDER: &str = "openai";

/// Load a `.env` file from the working directory or one of its parents into
/// the process environment. Variables that are already set keep their value.
///
/// Returns the path of the file that was loaded.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded .env");
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            warn!(error = %e, "ignoring unreadable .env file");
            None
        }
    }
}

/// Like [`load_dotenv`], for an explicit file. Returns whether it was loaded.
pub fn load_dotenv_from(path: &Path) -> bool {
    match dotenvy::from_path(path) {
        Ok(()) => true,
        Err(e) => {
            if !e.not_found() {
                warn!(path = %path.display(), error = %e, "ignoring unreadable .env file");
            }
            false
        }
    }
}

/// Read-only key/value lookup standing in for the process environment.
pub trait ConfigSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Value with surrounding whitespace removed; blank values count as unset.
    fn get_non_blank(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory settings, mostly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Canonical provider name: trimmed and lowercased, [`DEFAULT_PROVIDER`] when
/// unset or blank. No partial matching is applied.
pub fn normalize_provider_name(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_lowercase(),
        _ => DEFAULT_PROVIDER.to_string(),
    }
}

/// Built-in defaults for one provider and the prefix of its settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDefaults {
    pub name: String,
    /// `OPENAI` reads `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `OPENAI_MODEL`.
    pub env_prefix: String,
    pub base_url: String,
    pub model: String,
}

impl ProviderDefaults {
    pub fn new(
        name: impl Into<String>,
        env_prefix: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            env_prefix: env_prefix.into(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    pub fn openai() -> Self {
        Self::new(
            "openai",
            "OPENAI",
            "https://api.openai.com/v1/chat/completions",
            "gpt-4o-mini",
        )
    }

    pub fn groq() -> Self {
        Self::new(
            "groq",
            "GROQ",
            "https://api.groq.com/openai/v1/chat/completions",
            "llama-3.3-70b-specdec",
        )
    }

    pub fn gemini() -> Self {
        Self::new(
            "gemini",
            "GEMINI",
            "https://generativelanguage.googleapis.com/v1beta",
            "gemini-1.5-flash",
        )
    }

    pub fn api_key_var(&self) -> String {
        format!("{}_API_KEY", self.env_prefix)
    }

    pub fn base_url_var(&self) -> String {
        format!("{}_BASE_URL", self.env_prefix)
    }

    pub fn model_var(&self) -> String {
        format!("{}_MODEL", self.env_prefix)
    }
}

/// Settings for a single dispatch.
///
/// `api_key` stays optional here; drivers reject a missing key before any
/// network activity.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub name: String,
    pub api_key: Option<String>,
    pub api_key_var: String,
    pub base_url: String,
    pub model: String,
}

impl ProviderConfig {
    pub fn resolve(defaults: &ProviderDefaults, source: &dyn ConfigSource) -> Self {
        Self {
            name: defaults.name.clone(),
            api_key: source.get_non_blank(&defaults.api_key_var()),
            api_key_var: defaults.api_key_var(),
            base_url: source
                .get_non_blank(&defaults.base_url_var())
                .unwrap_or_else(|| defaults.base_url.clone()),
            model: source
                .get_non_blank(&defaults.model_var())
                .unwrap_or_else(|| defaults.model.clone()),
        }
    }
}

// API keys are never printed.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotenv_file_feeds_env_source_without_overriding() {
        let path = std::env::temp_dir().join(format!("tutor-qa-{}.env", std::process::id()));
        std::fs::write(
            &path,
            "TUTOR_QA_DOTENV_KEY=from-file\nTUTOR_QA_DOTENV_SET=from-file\n",
        )
        .unwrap();
        std::env::set_var("TUTOR_QA_DOTENV_SET", "from-process");

        assert!(load_dotenv_from(&path));
        assert_eq!(
            EnvSource.get_non_blank("TUTOR_QA_DOTENV_KEY").as_deref(),
            Some("from-file")
        );
        assert_eq!(
            EnvSource.get_non_blank("TUTOR_QA_DOTENV_SET").as_deref(),
            Some("from-process")
        );

        std::fs::remove_file(&path).unwrap();
        assert!(!load_dotenv_from(&path));
    }

    #[test]
    fn test_provider_name_normalization() {
        assert_eq!(normalize_provider_name(Some(" GROQ ")), "groq");
        assert_eq!(normalize_provider_name(Some("Gemini")), "gemini");
        assert_eq!(normalize_provider_name(Some("   ")), "openai");
        assert_eq!(normalize_provider_name(None), "openai");
        // No fuzzy matching: the value is kept as-is for the registry to reject.
        assert_eq!(normalize_provider_name(Some("gro")), "gro");
    }

    #[test]
    fn test_resolve_uses_defaults_when_unset() {
        let cfg = ProviderConfig::resolve(&ProviderDefaults::groq(), &MapSource::new());
        assert_eq!(cfg.name, "groq");
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.api_key_var, "GROQ_API_KEY");
        assert_eq!(cfg.base_url, "https://api.groq.com/openai/v1/chat/completions");
        assert_eq!(cfg.model, "llama-3.3-70b-specdec");
    }

    #[test]
    fn test_resolve_applies_overrides_and_ignores_blank_values() {
        let source: MapSource = [
            ("OPENAI_API_KEY", " sk-test "),
            ("OPENAI_BASE_URL", "http://localhost:9999/v1/chat/completions"),
            ("OPENAI_MODEL", "  "),
        ]
        .into_iter()
        .collect();
        let cfg = ProviderConfig::resolve(&ProviderDefaults::openai(), &source);
        assert_eq!(cfg.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.base_url, "http://localhost:9999/v1/chat/completions");
        assert_eq!(cfg.model, "gpt-4o-mini");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let source = MapSource::new().with("GEMINI_API_KEY", "secret-value");
        let cfg = ProviderConfig::resolve(&ProviderDefaults::gemini(), &source);
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("secret-value"));
        assert!(rendered.contains("<redacted>"));
    }
}
