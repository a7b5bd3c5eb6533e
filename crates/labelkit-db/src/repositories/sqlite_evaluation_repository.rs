//! `SQLite` implementation of the evaluation run repository.
//!
//! The terminal update is a conditional `UPDATE ... WHERE state = 'running'`,
//! so a run can leave `running` at most once no matter how many writers race.

use async_trait::async_trait;
use sqlx::SqlitePool;

use labelkit_core::domain::{
    EvalDetail, EvaluationOutcome, EvaluationState, NewEvalDetail, NewPromptEvaluation,
    PromptEvaluation,
};
use labelkit_core::ports::{EvaluationRepository, RepositoryError};

use super::row_mappers::{
    DETAIL_COLUMNS, DetailRow, EVALUATION_COLUMNS, EvaluationRow, collect_rows, map_sqlx_error,
    missing,
};

/// `SQLite` implementation of the `EvaluationRepository` trait.
pub struct SqliteEvaluationRepository {
    pool: SqlitePool,
}

impl SqliteEvaluationRepository {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn get_detail(&self, id: i64) -> Result<EvalDetail, RepositoryError> {
        sqlx::query_as::<_, DetailRow>(&format!(
            "SELECT {DETAIL_COLUMNS} FROM eval_details WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| missing("eval_details", id))?
        .try_into()
    }
}

#[async_trait]
impl EvaluationRepository for SqliteEvaluationRepository {
    async fn insert_run(
        &self,
        run: &NewPromptEvaluation,
    ) -> Result<PromptEvaluation, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO prompt_evaluations (project_id, prompt_id, spec_id, final_prompt, state)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(run.project_id)
        .bind(run.prompt_id)
        .bind(run.spec_id)
        .bind(&run.final_prompt)
        .bind(EvaluationState::Running.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.get_run(result.last_insert_rowid()).await
    }

    async fn get_run(&self, id: i64) -> Result<PromptEvaluation, RepositoryError> {
        sqlx::query_as::<_, EvaluationRow>(&format!(
            "SELECT {EVALUATION_COLUMNS} FROM prompt_evaluations WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| missing("prompt_evaluations", id))?
        .try_into()
    }

    async fn list_runs(&self, project_id: i64) -> Result<Vec<PromptEvaluation>, RepositoryError> {
        let rows = sqlx::query_as::<_, EvaluationRow>(&format!(
            "SELECT {EVALUATION_COLUMNS} FROM prompt_evaluations WHERE project_id = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        collect_rows(rows)
    }

    async fn complete_run(
        &self,
        id: i64,
        outcome: &EvaluationOutcome,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE prompt_evaluations
            SET state = ?, score = ?, duration_secs = ?, num_dataset = ?, analysis_text = ?
            WHERE id = ? AND state = ?
            "#,
        )
        .bind(outcome.state().as_str())
        .bind(outcome.score())
        .bind(outcome.duration_secs())
        .bind(outcome.num_dataset())
        .bind(outcome.analysis_text())
        .bind(id)
        .bind(EvaluationState::Running.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let applied = result.rows_affected() == 1;
        if !applied {
            tracing::debug!(run_id = id, "Terminal update ignored: run missing or not running");
        }
        Ok(applied)
    }

    async fn delete_run(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM prompt_evaluations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(missing("prompt_evaluations", id));
        }
        Ok(())
    }

    async fn run_exists(&self, id: i64) -> Result<bool, RepositoryError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM prompt_evaluations WHERE id = ?)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        Ok(exists)
    }

    async fn insert_detail(&self, detail: &NewEvalDetail) -> Result<EvalDetail, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO eval_details (file_id, prompt_eval_id, llm_label, llm_reason, result)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(detail.file_id)
        .bind(detail.prompt_eval_id)
        .bind(&detail.llm_label)
        .bind(&detail.llm_reason)
        .bind(detail.result.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.get_detail(result.last_insert_rowid()).await
    }

    async fn list_details(&self, run_id: i64) -> Result<Vec<EvalDetail>, RepositoryError> {
        let rows = sqlx::query_as::<_, DetailRow>(&format!(
            "SELECT {DETAIL_COLUMNS} FROM eval_details WHERE prompt_eval_id = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(run_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        collect_rows(rows)
    }
}
