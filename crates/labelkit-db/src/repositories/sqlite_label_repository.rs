//! `SQLite` implementation of the label repository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use labelkit_core::domain::{Label, NewLabel};
use labelkit_core::ports::{LabelRepository, RepositoryError};

use super::row_mappers::{LabelRow, collect_rows, map_sqlx_error, missing};

/// `SQLite` implementation of the `LabelRepository` trait.
pub struct SqliteLabelRepository {
    pool: SqlitePool,
}

impl SqliteLabelRepository {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LabelRepository for SqliteLabelRepository {
    async fn list_for_project(&self, project_id: i64) -> Result<Vec<Label>, RepositoryError> {
        let rows = sqlx::query_as::<_, LabelRow>(
            "SELECT id, project_id, name, created_at FROM labels WHERE project_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        collect_rows(rows)
    }

    async fn get(&self, id: i64) -> Result<Label, RepositoryError> {
        sqlx::query_as::<_, LabelRow>(
            "SELECT id, project_id, name, created_at FROM labels WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| missing("labels", id))?
        .try_into()
    }

    async fn insert(&self, label: &NewLabel) -> Result<Label, RepositoryError> {
        let result = sqlx::query("INSERT INTO labels (project_id, name) VALUES (?, ?)")
            .bind(label.project_id)
            .bind(&label.name)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        self.get(result.last_insert_rowid()).await
    }

    async fn rename(&self, id: i64, name: &str) -> Result<Label, RepositoryError> {
        let result = sqlx::query("UPDATE labels SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(missing("labels", id));
        }
        self.get(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM labels WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(missing("labels", id));
        }
        Ok(())
    }
}
