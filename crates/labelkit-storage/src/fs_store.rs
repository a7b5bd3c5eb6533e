//! Local filesystem object store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use labelkit_core::{ObjectStoreError, ObjectStorePort};
use tracing::debug;

use crate::key::validate_key;
use crate::signer::UrlSigner;

/// Stores each object as a file under `root`, at the path named by its key.
pub struct FsObjectStore {
    root: PathBuf,
    signer: Arc<UrlSigner>,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>, signer: Arc<UrlSigner>) -> Self {
        Self {
            root: root.into(),
            signer,
        }
    }

    /// Create the root directory if needed.
    pub async fn open(
        root: impl Into<PathBuf>,
        signer: Arc<UrlSigner>,
    ) -> Result<Self, ObjectStoreError> {
        let store = Self::new(root, signer);
        tokio::fs::create_dir_all(&store.root)
            .await
            .map_err(|e| io_error(&store.root.display().to_string(), &e))?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, ObjectStoreError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

fn io_error(key: &str, err: &std::io::Error) -> ObjectStoreError {
    match err.kind() {
        ErrorKind::NotFound => ObjectStoreError::NotFound(key.to_string()),
        _ => ObjectStoreError::Unavailable(format!("{key}: {err}")),
    }
}

#[async_trait]
impl ObjectStorePort for FsObjectStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        let path = self.path_for(key)?;
        tokio::fs::read(&path).await.map_err(|e| io_error(key, &e))
    }

    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: Option<String>,
    ) -> Result<(), ObjectStoreError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(key, &e))?;
        }
        let len = bytes.len();
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| io_error(key, &e))?;
        debug!(key = %key, bytes = len, "Stored object");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), ObjectStoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key = %key, "Deleted object");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, &e)),
        }
    }

    async fn stat(&self, key: &str) -> Result<bool, ObjectStoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(key, &e)),
        }
    }

    async fn presigned_get_url(&self, key: &str, ttl: Duration) -> Result<String, ObjectStoreError> {
        validate_key(key)?;
        self.signer.presigned_url(key, ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FsObjectStore {
        FsObjectStore::new(
            dir.path(),
            Arc::new(UrlSigner::new("secret", "http://localhost:3000")),
        )
    }

    #[tokio::test]
    async fn test_put_get_stat_delete() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert!(!store.stat("a-nut.jpg").await.unwrap());
        store
            .put("a-nut.jpg", b"jpeg".to_vec(), Some("image/jpeg".to_string()))
            .await
            .unwrap();
        assert!(store.stat("a-nut.jpg").await.unwrap());
        assert_eq!(store.get("a-nut.jpg").await.unwrap(), b"jpeg");

        store.delete("a-nut.jpg").await.unwrap();
        assert!(!store.stat("a-nut.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = store(&dir).get("missing.png").await.unwrap_err();
        assert!(matches!(err, ObjectStoreError::NotFound(k) if k == "missing.png"));
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).delete("missing.png").await.is_ok());
    }

    #[tokio::test]
    async fn test_nested_keys_create_directories() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.put("p1/x.png", vec![1, 2], None).await.unwrap();
        assert!(dir.path().join("p1").join("x.png").is_file());
        assert!(!store.stat("p1").await.unwrap());
    }

    #[tokio::test]
    async fn test_traversal_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let err = store.put("../escape.txt", vec![0], None).await.unwrap_err();
        assert!(matches!(err, ObjectStoreError::InvalidKey { .. }));
        assert!(!dir.path().parent().unwrap().join("escape.txt").exists());
    }

    #[tokio::test]
    async fn test_open_creates_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("blobs");
        let store = FsObjectStore::open(&root, Arc::new(UrlSigner::new("k", "http://h")))
            .await
            .unwrap();
        assert!(store.root().is_dir());
    }

    #[tokio::test]
    async fn test_presigned_url_points_at_objects_route() {
        let dir = TempDir::new().unwrap();
        let url = store(&dir)
            .presigned_get_url("a-nut.jpg", Duration::from_secs(3600))
            .await
            .unwrap();
        assert!(url.starts_with("http://localhost:3000/objects/a-nut.jpg?expires="));
        assert!(url.contains("&signature="));
    }
}
