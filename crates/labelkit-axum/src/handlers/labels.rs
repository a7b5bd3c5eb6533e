//! Label handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use labelkit_core::Label;

use crate::dto::LabelRequest;
use crate::error::HttpError;
use crate::state::AppState;

/// GET /api/projects/{id}/labels
pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<Label>>, HttpError> {
    Ok(Json(state.core.labels().list(project_id).await?))
}

/// POST /api/projects/{id}/labels
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(req): Json<LabelRequest>,
) -> Result<(StatusCode, Json<Label>), HttpError> {
    let label = state.core.labels().create(project_id, &req.name).await?;
    Ok((StatusCode::CREATED, Json(label)))
}

/// PUT /api/labels/{id}
pub async fn rename(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<LabelRequest>,
) -> Result<Json<Label>, HttpError> {
    Ok(Json(state.core.labels().rename(id, &req.name).await?))
}

/// DELETE /api/labels/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    state.core.labels().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
