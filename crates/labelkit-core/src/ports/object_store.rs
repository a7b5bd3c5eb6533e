//! Object store port.
//!
//! Dataset blobs are addressed by an opaque string key. Adapters decide
//! where bytes live (local directory, S3-like gateway) and how download
//! URLs are signed.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from object store operations.
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    /// No object is stored under the key.
    #[error("Object not found: {0}")]
    NotFound(String),

    /// The key is not acceptable to the backend.
    #[error("Invalid object key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// Transport or I/O failure reaching the backend.
    #[error("Object store unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with an error.
    #[error("Object store error: {0}")]
    Backend(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorePort: Send + Sync {
    /// Read the full content of an object.
    async fn get(&self, key: &str) -> Result<Vec<u8>, ObjectStoreError>;

    /// Write an object, replacing any previous content.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: Option<String>)
    -> Result<(), ObjectStoreError>;

    /// Delete an object. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), ObjectStoreError>;

    /// Whether an object exists under the key.
    async fn stat(&self, key: &str) -> Result<bool, ObjectStoreError>;

    /// Build a time-limited download URL for the object.
    async fn presigned_get_url(&self, key: &str, ttl: Duration) -> Result<String, ObjectStoreError>;
}
