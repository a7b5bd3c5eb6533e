//! Prompt template handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use labelkit_core::PromptTemplate;

use crate::dto::TextRequest;
use crate::error::HttpError;
use crate::state::AppState;

/// GET /api/projects/{id}/prompts
pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<PromptTemplate>>, HttpError> {
    Ok(Json(state.core.prompts().list(project_id).await?))
}

/// POST /api/projects/{id}/prompts
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(req): Json<TextRequest>,
) -> Result<(StatusCode, Json<PromptTemplate>), HttpError> {
    let created = state
        .core
        .prompts()
        .create(project_id, &req.name, req.text)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/prompts/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PromptTemplate>, HttpError> {
    Ok(Json(state.core.prompts().get(id).await?))
}

/// Replace the template name and text.
/// PUT /api/prompts/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TextRequest>,
) -> Result<Json<PromptTemplate>, HttpError> {
    Ok(Json(state.core.prompts().update(id, &req.name, req.text).await?))
}

/// DELETE /api/prompts/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    state.core.prompts().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
