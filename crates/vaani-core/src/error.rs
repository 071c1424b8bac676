use thiserror::Error;

/// Top-level error type for Vaani.
#[derive(Debug, Error)]
pub enum VaaniError {
    /// Error from the chat-completion provider.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a chat completion did not produce a reply.
///
/// Kept as a value so callers can tell an expired credential apart from a
/// flaky network, even though the caller on the phone hears the same apology.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The request did not complete within the client timeout.
    #[error("request timed out")]
    Timeout,

    /// The provider rejected the credential (401/403).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The provider is throttling us (429).
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Any other non-success HTTP status.
    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Connection-level failure (DNS, TLS, reset).
    #[error("network failure: {0}")]
    Network(String),

    /// The body was not a valid chat-completion response.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// A well-formed response that carried no message content.
    #[error("completion contained no choices")]
    EmptyCompletion,
}

impl ProviderError {
    /// Classify a non-success HTTP status together with its body.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::Unauthorized(body),
            429 => Self::RateLimited(body),
            _ => Self::Status { status, body },
        }
    }

    /// Short machine-friendly label, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Unauthorized(_) => "unauthorized",
            Self::RateLimited(_) => "rate_limited",
            Self::Status { .. } => "status",
            Self::Network(_) => "network",
            Self::Malformed(_) => "malformed",
            Self::EmptyCompletion => "empty_completion",
        }
    }
}
