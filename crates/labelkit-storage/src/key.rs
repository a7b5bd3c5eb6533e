//! Object key validation shared by the backends.

use labelkit_core::ObjectStoreError;

/// Accept only relative, non-empty keys without `..` segments or backslashes.
pub fn validate_key(key: &str) -> Result<(), ObjectStoreError> {
    let reason = if key.is_empty() {
        Some("key is empty")
    } else if key.starts_with('/') {
        Some("key must be relative")
    } else if key.contains('\\') {
        Some("key must not contain backslashes")
    } else if key.contains('\0') {
        Some("key must not contain NUL")
    } else if key.split('/').any(|segment| segment == "..") {
        Some("key must not contain '..' segments")
    } else if key.split('/').any(str::is_empty) {
        Some("key must not contain empty segments")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ObjectStoreError::InvalidKey {
            key: key.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
