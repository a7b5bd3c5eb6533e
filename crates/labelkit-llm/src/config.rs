//! Public configuration for the classification client.

use std::time::Duration;

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub(crate) const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for [`OpenAiClassifier`](crate::OpenAiClassifier).
///
/// # Example
///
/// ```
/// use labelkit_llm::LlmClientConfig;
/// use std::time::Duration;
///
/// let config = LlmClientConfig::new()
///     .with_model("gpt-4o")
///     .with_timeout(Duration::from_secs(120));
/// assert_eq!(config.model(), "gpt-4o");
/// ```
#[derive(Debug, Clone)]
pub struct LlmClientConfig {
    /// Base URL of the OpenAI-compatible API, without `/chat/completions`
    pub(crate) base_url: String,
    /// Bearer token sent with every request
    pub(crate) api_key: Option<String>,
    /// Model name passed in the request body
    pub(crate) model: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Upper bound on generated tokens per answer
    pub(crate) max_tokens: u32,
}

impl Default for LlmClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
            max_tokens: 1000,
        }
    }
}

impl LlmClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL.
    ///
    /// Defaults to `https://api.openai.com/v1`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set an optional API key. `None` clears a previously set key.
    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    /// Set the model name. Defaults to `gpt-4o-mini`.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout. Defaults to 60 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set `max_tokens` for each answer. Defaults to 1000.
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
