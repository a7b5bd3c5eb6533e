//! `SQLite` implementation of the project repository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use labelkit_core::domain::{NewProject, Project, ProjectStats};
use labelkit_core::ports::{ProjectRepository, RepositoryError};

use super::row_mappers::{ProjectRow, collect_rows, map_sqlx_error, missing};

/// `SQLite` implementation of the `ProjectRepository` trait.
pub struct SqliteProjectRepository {
    pool: SqlitePool,
}

impl SqliteProjectRepository {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqliteProjectRepository {
    async fn list(&self) -> Result<Vec<Project>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            "SELECT id, name, description, created_at FROM projects ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        collect_rows(rows)
    }

    async fn get(&self, id: i64) -> Result<Project, RepositoryError> {
        sqlx::query_as::<_, ProjectRow>(
            "SELECT id, name, description, created_at FROM projects WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| missing("projects", id))?
        .try_into()
    }

    async fn insert(&self, project: &NewProject) -> Result<Project, RepositoryError> {
        let result = sqlx::query("INSERT INTO projects (name, description) VALUES (?, ?)")
            .bind(&project.name)
            .bind(&project.description)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        self.get(result.last_insert_rowid()).await
    }

    async fn update(&self, project: &Project) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE projects SET name = ?, description = ? WHERE id = ?")
            .bind(&project.name)
            .bind(&project.description)
            .bind(project.id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(missing("projects", project.id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(missing("projects", id));
        }
        Ok(())
    }

    async fn stats(&self, id: i64) -> Result<ProjectStats, RepositoryError> {
        let (files, prompts, evaluations, criterias, inspection_specs): (i64, i64, i64, i64, i64) =
            sqlx::query_as(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM files WHERE project_id = ?1),
                    (SELECT COUNT(*) FROM prompt_templates WHERE project_id = ?1),
                    (SELECT COUNT(*) FROM prompt_evaluations WHERE project_id = ?1),
                    (SELECT COUNT(*) FROM criterias WHERE project_id = ?1),
                    (SELECT COUNT(*) FROM inspection_specs WHERE project_id = ?1)
                "#,
            )
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(ProjectStats {
            files,
            prompts,
            evaluations,
            criterias,
            inspection_specs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;

    async fn repo() -> SqliteProjectRepository {
        SqliteProjectRepository::new(setup_test_database().await.unwrap())
    }

    fn new_project(name: &str) -> NewProject {
        NewProject {
            name: name.to_string(),
            description: Some("demo".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = repo().await;
        let created = repo.insert(&new_project("nuts")).await.unwrap();
        let fetched = repo.get(created.id).await.unwrap();
        assert_eq!(created, fetched);
        assert_eq!(fetched.description.as_deref(), Some("demo"));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = repo().await;
        let first = repo.insert(&new_project("a")).await.unwrap();
        let second = repo.insert(&new_project("b")).await.unwrap();
        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = repo().await;
        let mut project = repo.insert(&new_project("a")).await.unwrap();
        project.name = "renamed".to_string();
        project.description = None;
        repo.update(&project).await.unwrap();
        let fetched = repo.get(project.id).await.unwrap();
        assert_eq!(fetched.name, "renamed");
        assert_eq!(fetched.description, None);

        repo.delete(project.id).await.unwrap();
        assert!(matches!(
            repo.get(project.id).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete(project.id).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_stats_counts_owned_rows() {
        let pool = setup_test_database().await.unwrap();
        let repo = SqliteProjectRepository::new(pool.clone());
        let project = repo.insert(&new_project("a")).await.unwrap();

        sqlx::query("INSERT INTO criterias (project_id, name) VALUES (?, 'round')")
            .bind(project.id)
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO prompt_templates (project_id, name, text) VALUES (?, 'p', 't')")
            .bind(project.id)
            .execute(&pool)
            .await
            .unwrap();

        let stats = repo.stats(project.id).await.unwrap();
        assert_eq!(
            stats,
            ProjectStats {
                files: 0,
                prompts: 1,
                evaluations: 0,
                criterias: 1,
                inspection_specs: 0,
            }
        );
    }
}
