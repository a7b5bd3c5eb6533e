//! `SQLite` implementations of the inspection spec and prompt template
//! repositories. Both tables share the same shape.

use async_trait::async_trait;
use sqlx::SqlitePool;

use labelkit_core::domain::{
    InspectionSpec, NewInspectionSpec, NewPromptTemplate, PromptTemplate,
};
use labelkit_core::ports::{InspectionSpecRepository, PromptTemplateRepository, RepositoryError};

use super::row_mappers::{TextRow, collect_rows, map_sqlx_error, missing};

/// CRUD over one `(id, project_id, name, text, created_at)` table.
struct TextTable {
    pool: SqlitePool,
    table: &'static str,
}

impl TextTable {
    async fn list(&self, project_id: i64) -> Result<Vec<TextRow>, RepositoryError> {
        sqlx::query_as::<_, TextRow>(&format!(
            "SELECT id, project_id, name, text, created_at FROM {} WHERE project_id = ? ORDER BY created_at DESC, id DESC",
            self.table
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn get(&self, id: i64) -> Result<TextRow, RepositoryError> {
        sqlx::query_as::<_, TextRow>(&format!(
            "SELECT id, project_id, name, text, created_at FROM {} WHERE id = ?",
            self.table
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| missing(self.table, id))
    }

    async fn insert(&self, project_id: i64, name: &str, text: &str) -> Result<TextRow, RepositoryError> {
        let result = sqlx::query(&format!(
            "INSERT INTO {} (project_id, name, text) VALUES (?, ?, ?)",
            self.table
        ))
        .bind(project_id)
        .bind(name)
        .bind(text)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.get(result.last_insert_rowid()).await
    }

    async fn update(&self, id: i64, name: &str, text: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET name = ?, text = ? WHERE id = ?",
            self.table
        ))
        .bind(name)
        .bind(text)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(missing(self.table, id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", self.table))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(missing(self.table, id));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inspection specs
// ─────────────────────────────────────────────────────────────────────────────

/// `SQLite` implementation of the `InspectionSpecRepository` trait.
pub struct SqliteInspectionSpecRepository {
    inner: TextTable,
}

impl SqliteInspectionSpecRepository {
    pub const fn new(pool: SqlitePool) -> Self {
        Self {
            inner: TextTable {
                pool,
                table: "inspection_specs",
            },
        }
    }
}

#[async_trait]
impl InspectionSpecRepository for SqliteInspectionSpecRepository {
    async fn list_for_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<InspectionSpec>, RepositoryError> {
        collect_rows(self.inner.list(project_id).await?)
    }

    async fn get(&self, id: i64) -> Result<InspectionSpec, RepositoryError> {
        self.inner.get(id).await?.try_into()
    }

    async fn insert(&self, spec: &NewInspectionSpec) -> Result<InspectionSpec, RepositoryError> {
        self.inner
            .insert(spec.project_id, &spec.name, &spec.text)
            .await?
            .try_into()
    }

    async fn update(&self, spec: &InspectionSpec) -> Result<(), RepositoryError> {
        self.inner.update(spec.id, &spec.name, &spec.text).await
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        self.inner.delete(id).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Prompt templates
// ─────────────────────────────────────────────────────────────────────────────

/// `SQLite` implementation of the `PromptTemplateRepository` trait.
pub struct SqlitePromptTemplateRepository {
    inner: TextTable,
}

impl SqlitePromptTemplateRepository {
    pub const fn new(pool: SqlitePool) -> Self {
        Self {
            inner: TextTable {
                pool,
                table: "prompt_templates",
            },
        }
    }
}

#[async_trait]
impl PromptTemplateRepository for SqlitePromptTemplateRepository {
    async fn list_for_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<PromptTemplate>, RepositoryError> {
        collect_rows(self.inner.list(project_id).await?)
    }

    async fn get(&self, id: i64) -> Result<PromptTemplate, RepositoryError> {
        self.inner.get(id).await?.try_into()
    }

    async fn insert(&self, prompt: &NewPromptTemplate) -> Result<PromptTemplate, RepositoryError> {
        self.inner
            .insert(prompt.project_id, &prompt.name, &prompt.text)
            .await?
            .try_into()
    }

    async fn update(&self, prompt: &PromptTemplate) -> Result<(), RepositoryError> {
        self.inner.update(prompt.id, &prompt.name, &prompt.text).await
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        self.inner.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;

    async fn setup() -> (SqlitePool, i64) {
        let pool = setup_test_database().await.unwrap();
        let project_id = sqlx::query("INSERT INTO projects (name) VALUES ('p')")
            .execute(&pool)
            .await
            .unwrap()
            .last_insert_rowid();
        (pool, project_id)
    }

    #[tokio::test]
    async fn test_spec_update_overwrites_text() {
        let (pool, project_id) = setup().await;
        let repo = SqliteInspectionSpecRepository::new(pool);
        let mut spec = repo
            .insert(&NewInspectionSpec {
                project_id,
                name: "nut".to_string(),
                text: "v1".to_string(),
            })
            .await
            .unwrap();
        spec.text = "v2".to_string();
        repo.update(&spec).await.unwrap();
        assert_eq!(repo.get(spec.id).await.unwrap().text, "v2");
        assert_eq!(repo.list_for_project(project_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_tables_are_independent() {
        let (pool, project_id) = setup().await;
        let specs = SqliteInspectionSpecRepository::new(pool.clone());
        let prompts = SqlitePromptTemplateRepository::new(pool);

        let prompt = prompts
            .insert(&NewPromptTemplate {
                project_id,
                name: "p".to_string(),
                text: "{{LABELS}}".to_string(),
            })
            .await
            .unwrap();

        assert!(specs.list_for_project(project_id).await.unwrap().is_empty());
        assert!(matches!(
            specs.get(prompt.id).await,
            Err(RepositoryError::NotFound(_))
        ));
        prompts.delete(prompt.id).await.unwrap();
        assert!(matches!(
            prompts.delete(prompt.id).await,
            Err(RepositoryError::NotFound(_))
        ));
    }
}
