//! Classification client over the chat-completions API.

use crate::config::LlmClientConfig;
use crate::http::{ChatBackend, ReqwestBackend};
use crate::parsing::{extract_content, parse_classification};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use labelkit_core::{Classification, ClassificationRequest, ClassifierError, ClassifierPort};
use serde_json::{Value, json};
use tracing::debug;

// ============================================================================
// Type Aliases
// ============================================================================

/// Classifier using the reqwest HTTP backend.
pub type OpenAiClassifier = LlmClassifier<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Vision classifier for OpenAI-compatible APIs, generic over the HTTP backend.
///
/// Use [`OpenAiClassifier`] in production code.
pub struct LlmClassifier<B: ChatBackend> {
    backend: B,
    model: String,
    max_tokens: u32,
}

impl OpenAiClassifier {
    pub fn new(config: &LlmClientConfig) -> Result<Self, ClassifierError> {
        let backend = ReqwestBackend::new(config)
            .map_err(|e| ClassifierError::Configuration(e.to_string()))?;
        Ok(Self::with_backend(config, backend))
    }
}

impl<B: ChatBackend> LlmClassifier<B> {
    pub(crate) fn with_backend(config: &LlmClientConfig, backend: B) -> Self {
        Self {
            backend,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }

    /// Build the request body for one classification.
    fn request_body(&self, request: &ClassificationRequest) -> Value {
        let data_url = format!(
            "data:{};base64,{}",
            request.mime_type,
            STANDARD.encode(&request.image)
        );

        json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": request.prompt },
                    { "type": "image_url", "image_url": { "url": data_url } },
                ],
            }],
            "response_format": response_format(&request.labels),
        })
    }
}

/// JSON schema asking for `classification` and `explanation`.
///
/// The classification is restricted to the label names when any are given.
fn response_format(labels: &[String]) -> Value {
    let mut classification = json!({ "type": "string" });
    if !labels.is_empty() {
        classification["enum"] = json!(labels);
    }

    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "classification",
            "strict": true,
            "schema": {
                "type": "object",
                "properties": {
                    "classification": classification,
                    "explanation": { "type": "string" },
                },
                "required": ["classification", "explanation"],
                "additionalProperties": false,
            },
        },
    })
}

#[async_trait]
impl<B: ChatBackend> ClassifierPort for LlmClassifier<B> {
    async fn classify(
        &self,
        request: ClassificationRequest,
    ) -> Result<Classification, ClassifierError> {
        debug!(
            model = %self.model,
            image_bytes = request.image.len(),
            mime_type = %request.mime_type,
            "Sending classification request"
        );

        let body = self.request_body(&request);
        let response = self.backend.post_chat(&body).await?;
        let content = extract_content(&response)?;
        let classification = parse_classification(&content)?;

        debug!(
            model = %self.model,
            classification = %classification.classification,
            "Classification received"
        );
        Ok(classification)
    }
}
