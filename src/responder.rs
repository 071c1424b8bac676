//! AI responder: turns one caller utterance into one spoken reply.
//!
//! Stateless: each call sends a fresh system + user exchange. Provider
//! failures never escape; they become a localized apology carrying the
//! categorized error.

use crate::i18n::t;
use std::sync::Arc;
use tracing::{info, warn};
use vaani_core::{context::ChatRequest, reply::AiReply, traits::ChatProvider};

/// Wraps the configured chat provider.
#[derive(Clone)]
pub struct Responder {
    provider: Arc<dyn ChatProvider>,
}

impl Responder {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn ChatProvider {
        self.provider.as_ref()
    }

    /// Answer `transcript` in `lang`. Unknown codes get the generic
    /// instruction and the English apology.
    pub async fn respond(&self, transcript: &str, lang: &str) -> AiReply {
        let request = ChatRequest::new(system_prompt(lang), transcript);

        let reply = match self.provider.complete(&request).await {
            Ok(completion) => AiReply::from_completion(completion),
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    lang,
                    kind = e.kind(),
                    "chat completion failed: {e}"
                );
                AiReply::fallback(apology(lang), e)
            }
        };

        info!(lang, fallback = reply.is_fallback(), "user: {transcript}");
        info!(lang, "ai: {}", reply.text);
        reply
    }
}

/// System instruction for a language code.
pub fn system_prompt(lang: &str) -> &'static str {
    t("system_prompt", lang)
}

/// Apology spoken when the model cannot answer.
pub fn apology(lang: &str) -> &'static str {
    t("apology", lang)
}
