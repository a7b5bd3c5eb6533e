//! Project handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use labelkit_core::{NewProject, Project, ProjectStats, ProjectUpdate, ProjectWithStats};

use crate::error::HttpError;
use crate::state::AppState;

/// List all projects, newest first.
/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Project>>, HttpError> {
    Ok(Json(state.core.projects().list().await?))
}

/// Create a project with the default labels.
/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewProject>,
) -> Result<(StatusCode, Json<Project>), HttpError> {
    let project = state.core.projects().create(req).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProjectWithStats>, HttpError> {
    Ok(Json(state.core.projects().get_with_stats(id).await?))
}

/// GET /api/projects/{id}/stats
pub async fn stats(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProjectStats>, HttpError> {
    Ok(Json(state.core.projects().stats(id).await?))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ProjectUpdate>,
) -> Result<Json<Project>, HttpError> {
    Ok(Json(state.core.projects().update(id, req).await?))
}

/// Delete a project and everything it owns.
/// DELETE /api/projects/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    state.core.projects().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
