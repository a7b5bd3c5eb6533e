//! Classification client port.
//!
//! The classifier is a black box that receives a compiled prompt and one
//! image and answers with a label and an explanation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input for one classification call.
#[derive(Debug, Clone)]
pub struct ClassificationRequest {
    pub prompt: String,
    pub image: Vec<u8>,
    pub mime_type: String,
    /// Allowed label names. Adapters may use them to constrain the output.
    pub labels: Vec<String>,
}

/// Structured classifier answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub classification: String,
    pub explanation: String,
}

/// Errors from classification calls. Each is a per-file failure.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The request never got a response.
    #[error("Classifier transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("Classifier API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The answer could not be parsed into a classification.
    #[error("Malformed classifier response: {0}")]
    MalformedResponse(String),

    #[error("Classifier configuration error: {0}")]
    Configuration(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassifierPort: Send + Sync {
    async fn classify(
        &self,
        request: ClassificationRequest,
    ) -> Result<Classification, ClassifierError>;
}
