//! OpenAI-compatible API provider.
//!
//! Works with OpenAI's API and any compatible endpoint.
//! Exports `pub(crate)` helpers reused by the Groq provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use vaani_core::{
    config::ProviderConfig,
    context::{ApiMessage, ChatRequest},
    error::{ProviderError, VaaniError},
    reply::Completion,
    traits::ChatProvider,
};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI-compatible provider.
pub struct OpenAiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, VaaniError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url,
            api_key,
            model,
        })
    }

    /// Create from config values.
    pub fn from_config(cfg: &ProviderConfig) -> Result<Self, VaaniError> {
        Self::new(
            cfg.base_url
                .clone()
                .unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
            cfg.api_key.clone(),
            cfg.model.clone(),
            Duration::from_secs(cfg.timeout_secs),
        )
    }
}

/// Shared HTTP client with a whole-request timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, VaaniError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| VaaniError::Config(format!("failed to build HTTP client: {e}")))
}

#[derive(Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ApiMessage>,
    pub stream: bool,
}

#[derive(Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Option<Vec<ChatChoice>>,
    pub model: Option<String>,
    pub usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
pub(crate) struct ChatChoice {
    pub message: Option<ChatChoiceMessage>,
}

#[derive(Deserialize)]
pub(crate) struct ChatChoiceMessage {
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct ChatUsage {
    pub total_tokens: Option<u64>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if any.
    pub(crate) fn first_text(&self) -> Option<&str> {
        self.choices
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }
}

/// Map a transport-level reqwest failure onto the provider taxonomy.
pub(crate) fn classify_transport_error(e: &reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else if e.is_decode() {
        ProviderError::Malformed(e.to_string())
    } else {
        ProviderError::Network(e.to_string())
    }
}

/// `POST {base_url}/chat/completions` and return the first choice.
pub(crate) async fn chat_completion(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    model: &str,
    request: &ChatRequest,
    provider_name: &str,
) -> Result<Completion, ProviderError> {
    let start = Instant::now();

    let body = ChatCompletionRequest {
        model,
        messages: request.to_api_messages(),
        stream: false,
    };

    let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));
    debug!("{provider_name}: POST {url} model={model}");

    let resp = client
        .post(&url)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| classify_transport_error(&e))?;

    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| classify_transport_error(&e))?;

    if !status.is_success() {
        return Err(ProviderError::from_status(status.as_u16(), text));
    }

    let parsed: ChatCompletionResponse = serde_json::from_str(&text)
        .map_err(|e| ProviderError::Malformed(format!("{provider_name}: {e}")))?;

    let reply = parsed
        .first_text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ProviderError::EmptyCompletion)?
        .to_string();

    Ok(Completion {
        text: reply,
        model: parsed.model,
        tokens_used: parsed.usage.as_ref().and_then(|u| u.total_tokens),
        processing_time_ms: start.elapsed().as_millis() as u64,
    })
}

/// `GET {base_url}/models` as a cheap credential + reachability probe.
pub(crate) async fn probe_models(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    provider_name: &str,
) -> bool {
    if api_key.is_empty() {
        warn!("{provider_name}: no API key configured");
        return false;
    }
    let url = format!("{}/models", base_url.trim_end_matches('/'));
    match client.get(&url).bearer_auth(api_key).send().await {
        Ok(resp) => resp.status().is_success(),
        Err(e) => {
            warn!("{provider_name} not available: {e}");
            false
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
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
            "openai",
        )
        .await
    }

    async fn is_available(&self) -> bool {
        probe_models(&self.client, &self.base_url, &self.api_key, "openai").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: &str, timeout: Duration) -> OpenAiProvider {
        OpenAiProvider::new(
            base_url.to_string(),
            "sk-test".into(),
            "gpt-4o-mini".into(),
            timeout,
        )
        .unwrap()
    }

    fn request() -> ChatRequest {
        ChatRequest::new("Be brief.", "What time is it?")
    }

    #[test]
    fn test_openai_provider_name() {
        let p = OpenAiProvider::from_config(&ProviderConfig {
            default: "openai".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(p.name(), "openai");
        assert_eq!(p.base_url, OPENAI_BASE_URL);
        assert!(p.requires_api_key());
    }

    #[test]
    fn test_response_parsing_first_choice() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"Hello!"},"finish_reason":"stop"},{"message":{"role":"assistant","content":"Other"}}],"model":"gpt-4o","usage":{"total_tokens":42}}"#;
        let resp: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.first_text(), Some("Hello!"));
        assert_eq!(resp.usage.as_ref().and_then(|u| u.total_tokens), Some(42));
    }

    #[tokio::test]
    async fn test_complete_sends_system_and_user_messages() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "stream": false,
                "messages": [
                    {"role": "system", "content": "Be brief."},
                    {"role": "user", "content": "What time is it?"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "  Noon.  "}}],
                "model": "gpt-4o-mini-2024",
                "usage": {"total_tokens": 17}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let p = provider(&server.uri(), Duration::from_secs(5));
        let completion = p.complete(&request()).await.unwrap();
        assert_eq!(completion.text, "Noon.");
        assert_eq!(completion.model.as_deref(), Some("gpt-4o-mini-2024"));
        assert_eq!(completion.tokens_used, Some(17));
    }

    #[tokio::test]
    async fn test_status_codes_are_classified() {
        for (status, expected) in [(401, "unauthorized"), (429, "rate_limited"), (500, "status")] {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
                .mount(&server)
                .await;

            let p = provider(&server.uri(), Duration::from_secs(5));
            let err = p.complete(&request()).await.unwrap_err();
            assert_eq!(err.kind(), expected, "status {status}");
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let p = provider(&server.uri(), Duration::from_secs(5));
        let err = p.complete(&request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_empty_choices_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let p = provider(&server.uri(), Duration::from_secs(5));
        let err = p.complete(&request()).await.unwrap_err();
        assert_eq!(err, ProviderError::EmptyCompletion);
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(500))
                    .set_body_json(json!({"choices": [{"message": {"content": "late"}}]})),
            )
            .mount(&server)
            .await;

        let p = provider(&server.uri(), Duration::from_millis(50));
        let err = p.complete(&request()).await.unwrap_err();
        assert_eq!(err, ProviderError::Timeout);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        // Nothing listens on port 9 (discard) in the test environment.
        let p = provider("http://127.0.0.1:9", Duration::from_secs(2));
        let err = p.complete(&request()).await.unwrap_err();
        assert!(
            matches!(err, ProviderError::Network(_) | ProviderError::Timeout),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn test_is_available_probes_models() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let p = provider(&server.uri(), Duration::from_secs(5));
        assert!(p.is_available().await);

        let keyless = OpenAiProvider::new(
            server.uri(),
            String::new(),
            "gpt-4o-mini".into(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert!(!keyless.is_available().await);
    }
}
