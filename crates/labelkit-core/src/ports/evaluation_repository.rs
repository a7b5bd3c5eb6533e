//! Evaluation run repository trait definition.
//!
//! A run row is written twice in its life: once on insert (always `running`)
//! and once by `complete_run`. Detail rows are append-only.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{
    EvalDetail, EvaluationOutcome, NewEvalDetail, NewPromptEvaluation, PromptEvaluation,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvaluationRepository: Send + Sync {
    /// Insert a run in `running` state with no score, duration or dataset size.
    async fn insert_run(&self, run: &NewPromptEvaluation)
    -> Result<PromptEvaluation, RepositoryError>;

    async fn get_run(&self, id: i64) -> Result<PromptEvaluation, RepositoryError>;

    /// List the runs of a project, newest first.
    async fn list_runs(&self, project_id: i64) -> Result<Vec<PromptEvaluation>, RepositoryError>;

    /// Apply the terminal update.
    ///
    /// Only a run still in `running` state is updated. Returns `false` when
    /// nothing was written because the run is gone or already terminal.
    async fn complete_run(
        &self,
        id: i64,
        outcome: &EvaluationOutcome,
    ) -> Result<bool, RepositoryError>;

    /// Delete a run and its detail rows.
    async fn delete_run(&self, id: i64) -> Result<(), RepositoryError>;

    async fn run_exists(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn insert_detail(&self, detail: &NewEvalDetail) -> Result<EvalDetail, RepositoryError>;

    /// List the detail rows of a run, newest first.
    async fn list_details(&self, run_id: i64) -> Result<Vec<EvalDetail>, RepositoryError>;
}
