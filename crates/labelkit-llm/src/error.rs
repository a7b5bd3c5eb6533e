//! Internal error types for the classification client.
//!
//! These errors stay inside `labelkit-llm` and are mapped to
//! [`ClassifierError`] at the port boundary.

use labelkit_core::ClassifierError;
use thiserror::Error;

pub type LlmResult<T> = Result<T, LlmError>;

#[derive(Debug, Error)]
pub enum LlmError {
    /// The API answered with a non-success status.
    #[error("Chat completions request failed with status {status}: {message}")]
    ApiRequestFailed { status: u16, message: String },

    /// The response envelope or the assistant answer had an unexpected shape.
    #[error("Invalid response from chat completions API: {message}")]
    InvalidResponse { message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<LlmError> for ClassifierError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::ApiRequestFailed { status, message } => Self::Api { status, message },
            LlmError::InvalidResponse { message } => Self::MalformedResponse(message),
            LlmError::JsonParse(e) => Self::MalformedResponse(e.to_string()),
            LlmError::Network(e) => Self::Transport(e.to_string()),
            LlmError::InvalidUrl(e) => Self::Configuration(e.to_string()),
        }
    }
}
