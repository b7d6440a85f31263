use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, WargaError};

/// Top-level configuration for the Warga assistant backend.
///
/// Loaded from `warga.toml` by default, then overlaid with environment
/// variables. Credentials have no usable defaults and are checked by
/// [`WargaConfig::validate`] at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WargaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub context: ContextConfig,
}

impl WargaConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: WargaConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Overlay values from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Overlay values using an arbitrary variable lookup.
    ///
    /// The `SUPABASE_*` names win over the `VITE_SUPABASE_*` names the
    /// frontend's `.env` file uses, so one env file can serve both.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |keys: &[&str]| {
            keys.iter()
                .filter_map(|k| lookup(k))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        };

        if let Some(url) = get(&["SUPABASE_URL", "VITE_SUPABASE_URL"]) {
            self.store.url = url;
        }
        if let Some(key) = get(&["SUPABASE_ANON_KEY", "VITE_SUPABASE_ANON_KEY"]) {
            self.store.anon_key = key;
        }
        if let Some(key) = get(&["GROQ_API_KEY"]) {
            self.llm.api_key = key;
        }
        if let Some(port) = get(&["WARGA_PORT"]) {
            match port.parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(_) => warn!(value = %port, "Ignoring invalid WARGA_PORT"),
            }
        }
        if let Some(origin) = get(&["WARGA_ALLOWED_ORIGIN"]) {
            self.server.allowed_origin = origin;
        }
    }

    /// Check that everything needed to serve requests is present.
    pub fn validate(&self) -> Result<()> {
        if self.store.url.trim().is_empty() {
            return Err(WargaError::Config(
                "table-store URL is not set (store.url or SUPABASE_URL)".to_string(),
            ));
        }
        if self.store.anon_key.trim().is_empty() {
            return Err(WargaError::Config(
                "table-store key is not set (store.anon_key or SUPABASE_ANON_KEY)".to_string(),
            ));
        }
        if self.llm.api_key.trim().is_empty() {
            return Err(WargaError::Config(
                "LLM API key is not set (llm.api_key or GROQ_API_KEY)".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(WargaError::Config(format!(
                "llm.temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// The single frontend origin allowed to call the API.
    pub allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origin: "http://localhost:5173".to_string(),
        }
    }
}

/// Hosted table-store (PostgREST) connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Anonymous API key.
    pub anon_key: String,
    /// Per-query timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            timeout_secs: 10,
        }
    }
}

/// LLM completion service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI-compatible API base (without `/chat/completions`).
    pub api_base: String,
    /// Provider API key.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature. Kept low so answers stay literal.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries after a timeout, rate limit or 5xx. Zero disables retrying.
    pub max_retries: u32,
    /// Delay between retries in milliseconds.
    pub retry_backoff_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.groq.com/openai/v1".to_string(),
            api_key: String::new(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.3,
            timeout_secs: 60,
            max_retries: 0,
            retry_backoff_ms: 500,
        }
    }
}

/// Assistant persona settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Language the assistant must answer in.
    pub language: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            language: "bahasa Indonesia".to_string(),
        }
    }
}

/// Context block collection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Seconds a collected context block may be reused. Zero disables caching.
    pub cache_ttl_secs: u64,
}
