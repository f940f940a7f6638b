use envq_core::redact_secrets;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("provider API error: status={status}, body={body}")]
    Api { status: u16, body: String },

    /// HTTP succeeded but the payload reported a failure status.
    #[error("upstream status {status}: {message}")]
    Status { status: String, message: String },
}

impl ProviderError {
    /// Display text with API keys scrubbed.
    pub fn redacted(&self) -> String {
        redact_secrets(&self.to_string())
    }
}
