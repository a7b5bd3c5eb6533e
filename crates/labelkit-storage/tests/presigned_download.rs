//! A presigned URL handed out by a store verifies against the same signer.

use std::sync::Arc;
use std::time::Duration;

use labelkit_core::ObjectStorePort;
use labelkit_storage::{FsObjectStore, SignatureError, UrlSigner};
use tempfile::TempDir;

fn query_param<'a>(url: &'a str, name: &str) -> &'a str {
    let query = url.split_once('?').map(|(_, q)| q).unwrap();
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix(&format!("{name}=")))
        .unwrap()
}

#[tokio::test]
async fn presigned_url_verifies_until_expiry() {
    let dir = TempDir::new().unwrap();
    let signer = Arc::new(UrlSigner::new("integration-secret", "http://127.0.0.1:3000"));
    let store = FsObjectStore::open(dir.path().join("blobs"), Arc::clone(&signer))
        .await
        .unwrap();

    store
        .put("f00d-nut.png", b"png-bytes".to_vec(), Some("image/png".to_string()))
        .await
        .unwrap();

    let url = store
        .presigned_get_url("f00d-nut.png", Duration::from_secs(300))
        .await
        .unwrap();
    let expires: u64 = query_param(&url, "expires").parse().unwrap();
    let signature = query_param(&url, "signature");

    assert_eq!(signer.verify("f00d-nut.png", expires, signature), Ok(()));
    assert_eq!(
        signer.verify_at("f00d-nut.png", expires, signature, expires + 1),
        Err(SignatureError::Expired)
    );
    assert_eq!(
        signer.verify("other.png", expires, signature),
        Err(SignatureError::Invalid)
    );
    assert_eq!(store.get("f00d-nut.png").await.unwrap(), b"png-bytes");
}
