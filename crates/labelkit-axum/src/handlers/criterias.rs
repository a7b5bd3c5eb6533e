//! Criteria handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use labelkit_core::Criteria;

use crate::dto::CriteriaRequest;
use crate::error::HttpError;
use crate::state::AppState;

/// GET /api/projects/{id}/criterias
pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<Criteria>>, HttpError> {
    Ok(Json(state.core.criterias().list(project_id).await?))
}

/// POST /api/projects/{id}/criterias
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(req): Json<CriteriaRequest>,
) -> Result<(StatusCode, Json<Criteria>), HttpError> {
    let criteria = state
        .core
        .criterias()
        .create(project_id, &req.name, req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(criteria)))
}

/// GET /api/criterias/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Criteria>, HttpError> {
    Ok(Json(state.core.criterias().get(id).await?))
}

/// PUT /api/criterias/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CriteriaRequest>,
) -> Result<Json<Criteria>, HttpError> {
    Ok(Json(
        state
            .core
            .criterias()
            .update(id, &req.name, req.description)
            .await?,
    ))
}

/// DELETE /api/criterias/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    state.core.criterias().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
