//! Form-encoded payload posted by the telephony platform on every callback.

use serde::Deserialize;

/// Fields of a Twilio voice webhook that the IVR cares about.
///
/// Every field is optional: a missing or empty value means the platform
/// had nothing to report, never that the request is invalid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoiceWebhook {
    #[serde(default)]
    pub call_sid: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub call_status: Option<String>,
    /// Keypad input from a digit `Gather`.
    #[serde(default)]
    pub digits: Option<String>,
    /// Transcript from a speech `Gather`.
    #[serde(default)]
    pub speech_result: Option<String>,
    /// Recognizer confidence, sent as a decimal string.
    #[serde(default)]
    pub confidence: Option<String>,
}

impl VoiceWebhook {
    /// Trimmed transcript, or `None` when absent or blank.
    pub fn transcript(&self) -> Option<&str> {
        non_blank(self.speech_result.as_deref())
    }

    /// Keypad digits as sent (empty string when absent).
    pub fn digits(&self) -> &str {
        self.digits.as_deref().unwrap_or_default()
    }

    /// Call identifier for log correlation.
    pub fn call_sid(&self) -> &str {
        self.call_sid.as_deref().unwrap_or("-")
    }

    pub fn confidence(&self) -> Option<f32> {
        self.confidence.as_deref().and_then(|c| c.trim().parse().ok())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
