mod defaults;


use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::VaaniError;
use defaults::*;

/// Environment variables checked for the provider credential, in priority order.
pub const API_KEY_ENV_VARS: &[&str] = &["VAANI_API_KEY", "GROQ_API_KEY"];

/// Top-level Vaani configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub vaani: VaaniConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub telephony: TelephonyConfig,
    /// File the values were read from. `None` when running on defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// General process settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaaniConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Fallback filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for daily-rolling log files. Unset = stdout only.
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for VaaniConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

/// Webhook HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// `Content-Type` of markup responses.
    #[serde(default = "default_markup_content_type")]
    pub markup_content_type: String,
    /// Largest accepted webhook body.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            markup_content_type: default_markup_content_type(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Chat-completion provider config.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// "groq" or "openai" (any OpenAI-compatible endpoint).
    #[serde(default = "default_provider")]
    pub default: String,
    /// Bearer credential. Prefer the environment over the config file.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Endpoint override. Unset = the provider's public URL.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Per-request timeout for the chat call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            default: default_provider(),
            api_key: String::new(),
            model: default_model(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("default", &self.default)
            .field(
                "api_key",
                &if self.api_key.is_empty() { "" } else { "<redacted>" },
            )
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Call-flow settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelephonyConfig {
    /// Prefix for callback URLs (e.g. "https://ivr.example.com"). Empty = relative URLs.
    #[serde(default)]
    pub callback_base_url: String,
    /// Send callers back to the language menu after an invalid digit
    /// instead of ending the interaction.
    #[serde(default)]
    pub redirect_on_invalid_selection: bool,
}

impl TelephonyConfig {
    /// Absolute or relative callback URL for `path` (which must start with `/`).
    pub fn callback_url(&self, path: &str) -> String {
        format!("{}{path}", self.callback_base_url.trim_end_matches('/'))
    }
}

impl Config {
    /// Parse a TOML document. Every section and field is optional.
    pub fn from_toml_str(content: &str) -> Result<Self, VaaniError> {
        toml::from_str(content)
            .map_err(|e| VaaniError::Config(format!("failed to parse config: {e}")))
    }

    /// Overlay values from the environment. `lookup` is `std::env::var` in production.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), VaaniError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = API_KEY_ENV_VARS.iter().find_map(|k| non_empty(*k)) {
            self.provider.api_key = key.trim().to_string();
        }
        if let Some(host) = non_empty("VAANI_HOST") {
            self.server.host = host;
        }
        if let Some(port) = non_empty("VAANI_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| VaaniError::Config(format!("invalid VAANI_PORT '{port}': {e}")))?;
        }
        if let Some(url) = non_empty("VAANI_CALLBACK_BASE_URL") {
            self.telephony.callback_base_url = url;
        }
        Ok(())
    }
}

/// Load configuration from a TOML file, then apply environment overrides.
///
/// Falls back to defaults if the file does not exist; `source` records which
/// happened.
pub fn load(path: &str) -> Result<Config, VaaniError> {
    let path = Path::new(path);
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path).map_err(|e| {
            VaaniError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let mut config = Config::from_toml_str(&content)?;
        config.source = Some(path.to_path_buf());
        config
    } else {
        Config::default()
    };

    config.apply_env_overrides(|k| std::env::var(k).ok())?;
    Ok(config)
}

/// Expand a leading `~/` to the home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}
