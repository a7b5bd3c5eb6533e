//! Evaluation run handlers.
//!
//! Starting a run answers `202 Accepted` once the run row exists. The
//! detached fan-out is not awaited; clients poll the run.

use axum::Json;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use labelkit_core::{EvaluationWithDetails, PromptEvaluation};

use crate::dto::{EvaluateParams, StartEvaluationRequest, StartedRun};
use crate::error::HttpError;
use crate::state::AppState;

async fn start_run(
    state: &AppState,
    project_id: i64,
    prompt_id: i64,
    spec_id: i64,
) -> Result<(StatusCode, Json<StartedRun>), HttpError> {
    let started = state
        .core
        .evaluations()
        .start(project_id, prompt_id, spec_id)
        .await?;
    // The join handle is dropped; the task keeps running detached.
    Ok((StatusCode::ACCEPTED, Json(StartedRun { id: started.run.id })))
}

/// GET /api/projects/{id}/evaluations
pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<PromptEvaluation>>, HttpError> {
    Ok(Json(state.core.evaluations().list(project_id).await?))
}

/// POST /api/projects/{id}/evaluations
pub async fn start(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(req): Json<StartEvaluationRequest>,
) -> Result<(StatusCode, Json<StartedRun>), HttpError> {
    start_run(&state, project_id, req.prompt_id, req.spec_id).await
}

/// Start a run from query parameters or an urlencoded form.
///
/// Query values win over form values when both are present.
/// POST /api/evaluate?projectId=&promptId=&specId=
pub async fn evaluate(
    State(state): State<AppState>,
    Query(query): Query<EvaluateParams>,
    form: Result<Form<EvaluateParams>, FormRejection>,
) -> Result<(StatusCode, Json<StartedRun>), HttpError> {
    let form = form.ok().map(|Form(params)| params);
    let from_form = |get: fn(&EvaluateParams) -> Option<i64>| form.as_ref().and_then(get);

    let project_id = required(
        query.project_id.or_else(|| from_form(|p| p.project_id)),
        "projectId",
    )?;
    let prompt_id = required(
        query.prompt_id.or_else(|| from_form(|p| p.prompt_id)),
        "promptId",
    )?;
    let spec_id = required(
        query.spec_id.or_else(|| from_form(|p| p.spec_id)),
        "specId",
    )?;

    start_run(&state, project_id, prompt_id, spec_id).await
}

fn required(value: Option<i64>, name: &str) -> Result<i64, HttpError> {
    value.ok_or_else(|| HttpError::BadRequest(format!("Missing parameter: {name}")))
}

/// GET /api/evaluations/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PromptEvaluation>, HttpError> {
    Ok(Json(state.core.evaluations().get(id).await?))
}

/// Run with its per-file detail rows, newest first.
/// GET /api/evaluations/{id}/details
pub async fn details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EvaluationWithDetails>, HttpError> {
    Ok(Json(state.core.evaluations().get_with_details(id).await?))
}

/// DELETE /api/evaluations/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    state.core.evaluations().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
