//! HTTP backend abstraction for the chat-completions endpoint.
//!
//! The classifier is generic over [`ChatBackend`] so the request building
//! and answer parsing can be tested against canned responses.

use crate::config::LlmClientConfig;
use crate::error::{LlmError, LlmResult};
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

// ============================================================================
// Backend Trait
// ============================================================================

/// Sends one chat-completions request body and returns the decoded response.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn post_chat(&self, body: &Value) -> LlmResult<Value>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production backend. One attempt per call, no retry.
pub struct ReqwestBackend {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl ReqwestBackend {
    pub fn new(config: &LlmClientConfig) -> LlmResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: chat_endpoint(&config.base_url)?,
            api_key: config.api_key.clone(),
        })
    }
}

/// `{base}/chat/completions`, tolerating a trailing slash on the base.
pub(crate) fn chat_endpoint(base_url: &str) -> LlmResult<Url> {
    let base = base_url.trim_end_matches('/');
    Ok(Url::parse(&format!("{base}/chat/completions"))?)
}

/// Pull a readable message out of an error body.
///
/// OpenAI-style APIs answer with `{"error": {"message": ...}}`; anything
/// else is returned as text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl ChatBackend for ReqwestBackend {
    async fn post_chat(&self, body: &Value) -> LlmResult<Value> {
        let mut request = self.client.post(self.endpoint.as_str()).json(body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiRequestFailed {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        Ok(response.json().await?)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
