//! Inspection spec handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use labelkit_core::InspectionSpec;

use crate::dto::TextRequest;
use crate::error::HttpError;
use crate::state::AppState;

/// GET /api/projects/{id}/specs
pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<InspectionSpec>>, HttpError> {
    Ok(Json(state.core.specs().list(project_id).await?))
}

/// POST /api/projects/{id}/specs
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(req): Json<TextRequest>,
) -> Result<(StatusCode, Json<InspectionSpec>), HttpError> {
    let created = state
        .core
        .specs()
        .create(project_id, &req.name, req.text)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/specs/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<InspectionSpec>, HttpError> {
    Ok(Json(state.core.specs().get(id).await?))
}

/// Overwrite name and text.
/// PUT /api/specs/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TextRequest>,
) -> Result<Json<InspectionSpec>, HttpError> {
    Ok(Json(state.core.specs().update(id, &req.name, req.text).await?))
}

/// DELETE /api/specs/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    state.core.specs().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
