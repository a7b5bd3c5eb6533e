//! Core services - the application's business logic layer.
//!
//! This module contains high-level service abstractions that orchestrate
//! between ports (trait interfaces) and domain logic. Services here are
//! pure orchestrators - they don't know about concrete implementations.

mod app_core;
mod criteria_service;
mod dataset_service;
mod evaluation_service;
mod label_service;
mod project_service;
mod text_service;

pub use app_core::AppCore;
pub use criteria_service::CriteriaService;
pub use dataset_service::{DatasetService, FileUpload, sanitize_file_name};
pub use evaluation_service::{EvaluationService, RunCompletion, StartedEvaluation};
pub use label_service::LabelService;
pub use project_service::ProjectService;
pub use text_service::{PromptService, SpecService};

use crate::ports::{CoreError, RepositoryError};

/// Map a repository lookup failure to a domain-level `NotFound`.
pub(crate) fn not_found(what: &str, id: i64) -> impl FnOnce(RepositoryError) -> CoreError + '_ {
    move |e| match e {
        RepositoryError::NotFound(_) => CoreError::NotFound(format!("{what} {id}")),
        other => CoreError::Repository(other),
    }
}

/// Map a uniqueness violation to `Conflict`.
pub(crate) fn conflict(e: RepositoryError) -> CoreError {
    match e {
        RepositoryError::AlreadyExists(msg) => CoreError::Conflict(msg),
        other => CoreError::Repository(other),
    }
}

/// Trim a user-supplied name and reject blank input.
pub(crate) fn require_name(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}
