//! Path-style HTTP object gateway (`{endpoint}/{bucket}/{key}`).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use labelkit_core::{ObjectStoreError, ObjectStorePort};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::debug;

use crate::key::validate_key;
use crate::signer::UrlSigner;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct S3LikeStore {
    endpoint: String,
    bucket: String,
    bearer_token: Option<String>,
    signer: Arc<UrlSigner>,
    client: Client,
}

impl S3LikeStore {
    pub fn new(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        signer: Arc<UrlSigner>,
    ) -> Result<Self, ObjectStoreError> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ObjectStoreError::Backend(format!("HTTP client: {e}")))?;
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            bucket: bucket.into(),
            bearer_token: None,
            signer,
            client,
        })
    }

    #[must_use]
    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn object_url(&self, key: &str) -> Result<String, ObjectStoreError> {
        validate_key(key)?;
        Ok(format!("{}/{}/{}", self.endpoint, self.bucket, key))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, key: &str, request: RequestBuilder) -> Result<Response, ObjectStoreError> {
        self.authorize(request)
            .send()
            .await
            .map_err(|e| ObjectStoreError::Unavailable(format!("{key}: {e}")))
    }
}

fn status_error(key: &str, status: StatusCode) -> ObjectStoreError {
    if status == StatusCode::NOT_FOUND {
        ObjectStoreError::NotFound(key.to_string())
    } else {
        ObjectStoreError::Backend(format!("{key}: gateway answered {status}"))
    }
}

#[async_trait]
impl ObjectStorePort for S3LikeStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        let url = self.object_url(key)?;
        let response = self.send(key, self.client.get(url)).await?;
        if !response.status().is_success() {
            return Err(status_error(key, response.status()));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ObjectStoreError::Unavailable(format!("{key}: {e}")))?;
        Ok(bytes.to_vec())
    }

    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<(), ObjectStoreError> {
        let url = self.object_url(key)?;
        let len = bytes.len();
        let mut request = self.client.put(url).body(bytes);
        if let Some(content_type) = content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        let response = self.send(key, request).await?;
        if !response.status().is_success() {
            return Err(status_error(key, response.status()));
        }
        debug!(key = %key, bucket = %self.bucket, bytes = len, "Stored object");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), ObjectStoreError> {
        let url = self.object_url(key)?;
        let response = self.send(key, self.client.delete(url)).await?;
        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            debug!(key = %key, bucket = %self.bucket, "Deleted object");
            return Ok(());
        }
        Err(status_error(key, status))
    }

    async fn stat(&self, key: &str) -> Result<bool, ObjectStoreError> {
        let url = self.object_url(key)?;
        let response = self.send(key, self.client.head(url)).await?;
        match response.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            s => Err(status_error(key, s)),
        }
    }

    async fn presigned_get_url(&self, key: &str, ttl: Duration) -> Result<String, ObjectStoreError> {
        validate_key(key)?;
        self.signer.presigned_url(key, ttl)
    }
}
