use serde::{Deserialize, Serialize};

/// A single-turn request to a chat-completion provider.
///
/// There is no history: every caller utterance is answered on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// System instruction sent ahead of the user message.
    pub system_prompt: String,
    /// The caller's transcript.
    pub user_message: String,
}

/// A structured message for OpenAI-style APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    /// "system" or "user".
    pub role: String,
    /// The message content.
    pub content: String,
}

impl ChatRequest {
    pub fn new(system_prompt: &str, user_message: &str) -> Self {
        Self {
            system_prompt: system_prompt.to_string(),
            user_message: user_message.to_string(),
        }
    }

    /// The system + user exchange, system first. An empty system prompt is omitted.
    pub fn to_api_messages(&self) -> Vec<ApiMessage> {
        let mut messages = Vec::with_capacity(2);
        if !self.system_prompt.is_empty() {
            messages.push(ApiMessage {
                role: "system".to_string(),
                content: self.system_prompt.clone(),
            });
        }
        messages.push(ApiMessage {
            role: "user".to_string(),
            content: self.user_message.clone(),
        });
        messages
    }
}
