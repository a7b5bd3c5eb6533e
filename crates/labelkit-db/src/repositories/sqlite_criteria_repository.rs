//! `SQLite` implementation of the criteria repository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use labelkit_core::domain::{Criteria, CriteriaExample, NewCriteria};
use labelkit_core::ports::{CriteriaRepository, RepositoryError};

use super::row_mappers::{
    CriteriaExampleRow, CriteriaRow, collect_rows, map_sqlx_error, missing,
};

/// `SQLite` implementation of the `CriteriaRepository` trait.
pub struct SqliteCriteriaRepository {
    pool: SqlitePool,
}

impl SqliteCriteriaRepository {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CriteriaRepository for SqliteCriteriaRepository {
    async fn list_for_project(&self, project_id: i64) -> Result<Vec<Criteria>, RepositoryError> {
        let rows = sqlx::query_as::<_, CriteriaRow>(
            "SELECT id, project_id, name, description, created_at FROM criterias WHERE project_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        collect_rows(rows)
    }

    async fn get(&self, id: i64) -> Result<Criteria, RepositoryError> {
        sqlx::query_as::<_, CriteriaRow>(
            "SELECT id, project_id, name, description, created_at FROM criterias WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| missing("criterias", id))?
        .try_into()
    }

    async fn insert(&self, criteria: &NewCriteria) -> Result<Criteria, RepositoryError> {
        let result =
            sqlx::query("INSERT INTO criterias (project_id, name, description) VALUES (?, ?, ?)")
                .bind(criteria.project_id)
                .bind(&criteria.name)
                .bind(&criteria.description)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        self.get(result.last_insert_rowid()).await
    }

    async fn update(&self, criteria: &Criteria) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE criterias SET name = ?, description = ? WHERE id = ?")
            .bind(&criteria.name)
            .bind(&criteria.description)
            .bind(criteria.id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(missing("criterias", criteria.id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM criterias WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(missing("criterias", id));
        }
        Ok(())
    }

    async fn upsert_example(&self, example: &CriteriaExample) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO criteria_examples (file_id, criteria_id, is_fail, reason)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(file_id, criteria_id) DO UPDATE SET
                is_fail = excluded.is_fail,
                reason = excluded.reason
            "#,
        )
        .bind(example.file_id)
        .bind(example.criteria_id)
        .bind(example.is_fail)
        .bind(&example.reason)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn examples_for_file(&self, file_id: i64) -> Result<Vec<CriteriaExample>, RepositoryError> {
        let rows = sqlx::query_as::<_, CriteriaExampleRow>(
            "SELECT file_id, criteria_id, is_fail, reason FROM criteria_examples WHERE file_id = ? ORDER BY criteria_id",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(CriteriaExample::from).collect())
    }

    async fn examples_for_criteria(
        &self,
        criteria_id: i64,
    ) -> Result<Vec<CriteriaExample>, RepositoryError> {
        let rows = sqlx::query_as::<_, CriteriaExampleRow>(
            "SELECT file_id, criteria_id, is_fail, reason FROM criteria_examples WHERE criteria_id = ? ORDER BY file_id",
        )
        .bind(criteria_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(CriteriaExample::from).collect())
    }
}
