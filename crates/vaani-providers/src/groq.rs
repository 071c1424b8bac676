//! Groq hosted-inference provider.
//!
//! Groq speaks the OpenAI chat-completions dialect, so this reuses the
//! OpenAI request/response handling. Only the base URL and name differ.

use async_trait::async_trait;
use std::time::Duration;
use vaani_core::{
    config::ProviderConfig,
    context::ChatRequest,
    error::{ProviderError, VaaniError},
    reply::Completion,
    traits::ChatProvider,
};

use crate::openai::{build_client, chat_completion, probe_models};

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Groq provider.
pub struct GroqProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GroqProvider {
    /// Create from config values. `base_url` overrides the public endpoint.
    pub fn from_config(cfg: &ProviderConfig) -> Result<Self, VaaniError> {
        Ok(Self {
            client: build_client(Duration::from_secs(cfg.timeout_secs))?,
            base_url: cfg
                .base_url
                .clone()
                .unwrap_or_else(|| GROQ_BASE_URL.to_string()),
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
        })
    }
}

#[async_trait]
impl ChatProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn requires_api_key(&self) -> bool {
        true
    }

    async fn complete(&self, request: &ChatRequest) -> Result<Completion, ProviderError> {
        chat_completion(
            &self.client,
            &self.base_url,
            &self.api_key,
            &self.model,
            request,
            "groq",
        )
        .await
    }

    async fn is_available(&self) -> bool {
        probe_models(&self.client, &self.base_url, &self.api_key, "groq").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_groq_defaults() {
        let p = GroqProvider::from_config(&ProviderConfig::default()).unwrap();
        assert_eq!(p.name(), "groq");
        assert_eq!(p.base_url, GROQ_BASE_URL);
        assert_eq!(p.model(), "llama-3.3-70b-versatile");
        assert!(p.requires_api_key());
    }

    #[tokio::test]
    async fn test_groq_complete_against_override_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer gsk-test"))
            .and(body_partial_json(json!({"model": "llama-3.3-70b-versatile"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "नमस्ते, कैसे मदद करूं?"}}],
                "model": "llama-3.3-70b-versatile"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let p = GroqProvider::from_config(&ProviderConfig {
            api_key: "gsk-test".into(),
            base_url: Some(server.uri()),
            ..Default::default()
        })
        .unwrap();

        let completion = p
            .complete(&ChatRequest::new("system", "नमस्ते"))
            .await
            .unwrap();
        assert_eq!(completion.text, "नमस्ते, कैसे मदद करूं?");
    }
}
