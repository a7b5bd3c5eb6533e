//! HMAC-SHA256 signing of time-limited download URLs.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use labelkit_core::ObjectStoreError;
use sha2::Sha256;
use thiserror::Error;
use url::Url;

type HmacSha256 = Hmac<Sha256>;

/// Route prefix the HTTP adapter serves presigned downloads under.
pub const OBJECTS_ROUTE: &str = "objects";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Download URL expired")]
    Expired,

    #[error("Download URL signature is invalid")]
    Invalid,

    #[error("Signing key rejected: {0}")]
    Key(String),
}

/// Signs and verifies `/objects/{key}` download URLs.
#[derive(Clone)]
pub struct UrlSigner {
    secret: Vec<u8>,
    public_base_url: String,
}

impl std::fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSigner")
            .field("public_base_url", &self.public_base_url)
            .finish_non_exhaustive()
    }
}

impl UrlSigner {
    pub fn new(secret: impl Into<Vec<u8>>, public_base_url: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    fn mac(&self, key: &str, expires: u64) -> Result<HmacSha256, SignatureError> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.secret)
            .map_err(|e| SignatureError::Key(e.to_string()))?;
        mac.update(key.as_bytes());
        mac.update(b"\n");
        mac.update(expires.to_string().as_bytes());
        Ok(mac)
    }

    /// Hex signature for `key` valid until `expires` (unix seconds).
    pub fn sign(&self, key: &str, expires: u64) -> Result<String, SignatureError> {
        Ok(hex::encode(self.mac(key, expires)?.finalize().into_bytes()))
    }

    /// Build a download URL for `key` that expires `ttl` from now.
    pub fn presigned_url(&self, key: &str, ttl: Duration) -> Result<String, ObjectStoreError> {
        let expires = unix_now().saturating_add(ttl.as_secs());
        self.presigned_url_at(key, expires)
    }

    pub(crate) fn presigned_url_at(
        &self,
        key: &str,
        expires: u64,
    ) -> Result<String, ObjectStoreError> {
        let mut url = Url::parse(&self.public_base_url)
            .map_err(|e| ObjectStoreError::Backend(format!("invalid public base URL: {e}")))?;
        let signature = self
            .sign(key, expires)
            .map_err(|e| ObjectStoreError::Backend(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ObjectStoreError::Backend("public base URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .push(OBJECTS_ROUTE)
            .extend(key.split('/'));
        url.query_pairs_mut()
            .append_pair("expires", &expires.to_string())
            .append_pair("signature", &signature);
        Ok(url.into())
    }

    /// Check a signature against the current clock.
    pub fn verify(&self, key: &str, expires: u64, signature: &str) -> Result<(), SignatureError> {
        self.verify_at(key, expires, signature, unix_now())
    }

    pub fn verify_at(
        &self,
        key: &str,
        expires: u64,
        signature: &str,
        now: u64,
    ) -> Result<(), SignatureError> {
        let provided = hex::decode(signature).map_err(|_| SignatureError::Invalid)?;
        self.mac(key, expires)?
            .verify_slice(&provided)
            .map_err(|_| SignatureError::Invalid)?;
        if now > expires {
            return Err(SignatureError::Expired);
        }
        Ok(())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}
