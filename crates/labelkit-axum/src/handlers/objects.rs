//! Presigned object downloads.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;

use crate::dto::DownloadQuery;
use crate::error::HttpError;
use crate::state::AppState;

/// Serve an object after checking its URL signature.
/// GET /objects/{*key}?expires=&signature=
pub async fn download(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> Result<impl IntoResponse, HttpError> {
    state.signer.verify(&key, query.expires, &query.signature)?;
    let bytes = state.store.get(&key).await?;
    tracing::debug!(key = %key, bytes = bytes.len(), "Serving presigned download");
    Ok(([(header::CONTENT_TYPE, content_type_for(&key))], bytes))
}

/// Best-effort content type from the key's extension.
fn content_type_for(key: &str) -> &'static str {
    let ext = key
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("abc-nut.JPG"), "image/jpeg");
        assert_eq!(content_type_for("abc-nut.png"), "image/png");
        assert_eq!(content_type_for("no-extension"), "application/octet-stream");
    }
}
