use crate::{context::ChatRequest, error::ProviderError, reply::Completion};
use async_trait::async_trait;

/// Chat-completion backend.
///
/// Every hosted model API (Groq, OpenAI, any compatible endpoint)
/// implements this trait so the responder can stay provider-agnostic.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Model used when the request carries no override.
    fn model(&self) -> &str;

    /// Whether this provider requires an API key to function.
    fn requires_api_key(&self) -> bool;

    /// Send a single-turn request and return the first completion.
    async fn complete(&self, request: &ChatRequest) -> Result<Completion, ProviderError>;

    /// Check if the provider is reachable and accepts our credential.
    async fn is_available(&self) -> bool;
}
