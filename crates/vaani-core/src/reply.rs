use crate::error::ProviderError;

/// A successful chat completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    /// Model identifier reported by the provider (if any).
    pub model: Option<String>,
    /// Token count (if available from the provider).
    pub tokens_used: Option<u64>,
    /// Wall-clock request time in milliseconds.
    pub processing_time_ms: u64,
}

/// Where the words spoken to the caller came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOrigin {
    /// The model answered.
    Model {
        model: Option<String>,
        tokens_used: Option<u64>,
        processing_time_ms: u64,
    },
    /// The model call failed and a canned apology is spoken instead.
    Fallback(ProviderError),
}

/// Text to speak back for one caller utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiReply {
    pub text: String,
    pub origin: ReplyOrigin,
}

impl AiReply {
    pub fn from_completion(completion: Completion) -> Self {
        Self {
            text: completion.text,
            origin: ReplyOrigin::Model {
                model: completion.model,
                tokens_used: completion.tokens_used,
                processing_time_ms: completion.processing_time_ms,
            },
        }
    }

    pub fn fallback(text: &str, error: ProviderError) -> Self {
        Self {
            text: text.to_string(),
            origin: ReplyOrigin::Fallback(error),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, ReplyOrigin::Fallback(_))
    }

    /// The failure behind a fallback reply.
    pub fn failure(&self) -> Option<&ProviderError> {
        match &self.origin {
            ReplyOrigin::Fallback(e) => Some(e),
            ReplyOrigin::Model { .. } => None,
        }
    }
}
