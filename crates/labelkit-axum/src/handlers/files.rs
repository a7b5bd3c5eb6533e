//! Dataset file handlers, including multipart upload.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use labelkit_core::{CriteriaExample, DatasetFile, FileUpload, UploadType};

use crate::dto::{CriteriaExampleRequest, LabelAssignment, UrlResponse};
use crate::error::HttpError;
use crate::state::AppState;

/// Upper bound for one multipart upload request.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

// ─────────────────────────────────────────────────────────────────────────────
// Files
// ─────────────────────────────────────────────────────────────────────────────

/// List a project's files, newest first.
/// GET /api/projects/{id}/files
pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<DatasetFile>>, HttpError> {
    Ok(Json(state.core.files().list(project_id).await?))
}

struct FilePart {
    name: String,
    mime_type: Option<String>,
    bytes: Vec<u8>,
}

/// Upload one or more files.
///
/// Every `file` part becomes a dataset file; an optional `label` text part
/// applies to all of them.
/// POST /api/projects/{id}/files
pub async fn upload(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Vec<DatasetFile>>), HttpError> {
    let mut parts = Vec::new();
    let mut label = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("file") => {
                let name = field.file_name().unwrap_or("upload").to_string();
                let mime_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| HttpError::BadRequest(format!("Failed to read '{name}': {e}")))?;
                parts.push(FilePart {
                    name,
                    mime_type,
                    bytes: bytes.to_vec(),
                });
            }
            Some("label") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| HttpError::BadRequest(format!("Invalid label field: {e}")))?;
                label = Some(text).filter(|l| !l.trim().is_empty());
            }
            _ => {}
        }
    }

    if parts.is_empty() {
        return Err(HttpError::BadRequest("No file part in upload".to_string()));
    }

    let mut uploaded = Vec::with_capacity(parts.len());
    for part in parts {
        let file = state
            .core
            .files()
            .upload(FileUpload {
                project_id,
                original_name: part.name,
                mime_type: part.mime_type,
                bytes: part.bytes,
                human_label: label.clone(),
                upload_type: UploadType::Manual,
            })
            .await?;
        uploaded.push(file);
    }

    tracing::info!(project_id, count = uploaded.len(), "Files uploaded");
    Ok((StatusCode::CREATED, Json(uploaded)))
}

/// GET /api/files/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DatasetFile>, HttpError> {
    Ok(Json(state.core.files().get(id).await?))
}

/// DELETE /api/files/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    state.core.files().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Set or clear the ground-truth label.
/// PUT /api/files/{id}/label
pub async fn set_label(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<LabelAssignment>,
) -> Result<Json<DatasetFile>, HttpError> {
    Ok(Json(
        state.core.files().set_label(id, req.label.as_deref()).await?,
    ))
}

/// GET /api/files/{id}/url
pub async fn presigned_url(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UrlResponse>, HttpError> {
    let url = state.core.files().presigned_url(id).await?;
    Ok(Json(UrlResponse { url }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Criteria examples
// ─────────────────────────────────────────────────────────────────────────────

/// GET /api/files/{id}/criterias
pub async fn list_examples(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<CriteriaExample>>, HttpError> {
    Ok(Json(state.core.criterias().examples_for_file(id).await?))
}

/// PUT /api/files/{id}/criterias/{criteria_id}
pub async fn set_example(
    State(state): State<AppState>,
    Path((file_id, criteria_id)): Path<(i64, i64)>,
    Json(req): Json<CriteriaExampleRequest>,
) -> Result<Json<CriteriaExample>, HttpError> {
    let example = state
        .core
        .criterias()
        .set_example(CriteriaExample {
            file_id,
            criteria_id,
            is_fail: req.is_fail,
            reason: req.reason,
        })
        .await?;
    Ok(Json(example))
}
