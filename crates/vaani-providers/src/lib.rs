//! # vaani-providers
//!
//! Chat-completion provider implementations for Vaani.

pub mod groq;
pub mod openai;

use std::sync::Arc;
use vaani_core::{config::ProviderConfig, error::VaaniError, traits::ChatProvider};

/// Build the configured provider.
pub fn build_provider(cfg: &ProviderConfig) -> Result<Arc<dyn ChatProvider>, VaaniError> {
    match cfg.default.as_str() {
        "groq" => Ok(Arc::new(groq::GroqProvider::from_config(cfg)?)),
        "openai" => Ok(Arc::new(openai::OpenAiProvider::from_config(cfg)?)),
        other => Err(VaaniError::Config(format!(
            "unsupported provider '{other}', expected 'groq' or 'openai'"
        ))),
    }
}
