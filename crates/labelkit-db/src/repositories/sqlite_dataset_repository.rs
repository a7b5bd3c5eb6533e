//! `SQLite` implementation of the dataset file repository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use labelkit_core::domain::{DatasetFile, NewDatasetFile};
use labelkit_core::ports::{DatasetRepository, RepositoryError};

use super::row_mappers::{FILE_COLUMNS, FileRow, collect_rows, map_sqlx_error, missing};

/// `SQLite` implementation of the `DatasetRepository` trait.
pub struct SqliteDatasetRepository {
    pool: SqlitePool,
}

impl SqliteDatasetRepository {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatasetRepository for SqliteDatasetRepository {
    async fn list_for_project(&self, project_id: i64) -> Result<Vec<DatasetFile>, RepositoryError> {
        let rows = sqlx::query_as::<_, FileRow>(&format!(
            "SELECT {FILE_COLUMNS} FROM files WHERE project_id = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        collect_rows(rows)
    }

    async fn list_labeled(&self, project_id: i64) -> Result<Vec<DatasetFile>, RepositoryError> {
        let rows = sqlx::query_as::<_, FileRow>(&format!(
            "SELECT {FILE_COLUMNS} FROM files WHERE project_id = ? AND human_label IS NOT NULL ORDER BY id"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        collect_rows(rows)
    }

    async fn count_with_label(&self, project_id: i64, label: &str) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM files WHERE project_id = ? AND human_label = ? COLLATE NOCASE",
        )
        .bind(project_id)
        .bind(label)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(count.unsigned_abs())
    }

    async fn get(&self, id: i64) -> Result<DatasetFile, RepositoryError> {
        sqlx::query_as::<_, FileRow>(&format!("SELECT {FILE_COLUMNS} FROM files WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| missing("files", id))?
            .try_into()
    }

    async fn insert(&self, file: &NewDatasetFile) -> Result<DatasetFile, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO files (project_id, file_name, original_name, mime_type, size, human_label, upload_type)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(file.project_id)
        .bind(&file.file_name)
        .bind(&file.original_name)
        .bind(&file.mime_type)
        .bind(file.size)
        .bind(&file.human_label)
        .bind(file.upload_type.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.get(result.last_insert_rowid()).await
    }

    async fn set_human_label(
        &self,
        id: i64,
        label: Option<&str>,
    ) -> Result<DatasetFile, RepositoryError> {
        let result = sqlx::query("UPDATE files SET human_label = ? WHERE id = ?")
            .bind(label)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(missing("files", id));
        }
        self.get(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM files WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(missing("files", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;
    use labelkit_core::domain::UploadType;

    async fn setup() -> (SqliteDatasetRepository, i64) {
        let pool = setup_test_database().await.unwrap();
        let project_id = sqlx::query("INSERT INTO projects (name) VALUES ('p')")
            .execute(&pool)
            .await
            .unwrap()
            .last_insert_rowid();
        (SqliteDatasetRepository::new(pool), project_id)
    }

    fn new_file(project_id: i64, key: &str, label: Option<&str>) -> NewDatasetFile {
        NewDatasetFile {
            project_id,
            file_name: key.to_string(),
            original_name: "nut.png".to_string(),
            mime_type: Some("image/png".to_string()),
            size: 128,
            human_label: label.map(str::to_string),
            upload_type: UploadType::Api,
        }
    }

    #[tokio::test]
    async fn test_insert_round_trips_all_columns() {
        let (repo, project_id) = setup().await;
        let file = repo
            .insert(&new_file(project_id, "k1-nut.png", Some("pass")))
            .await
            .unwrap();
        assert_eq!(file.file_name, "k1-nut.png");
        assert_eq!(file.mime_type.as_deref(), Some("image/png"));
        assert_eq!(file.size, 128);
        assert_eq!(file.human_label.as_deref(), Some("pass"));
        assert_eq!(file.upload_type, UploadType::Api);
    }

    #[tokio::test]
    async fn test_duplicate_key_is_rejected() {
        let (repo, project_id) = setup().await;
        repo.insert(&new_file(project_id, "same", None)).await.unwrap();
        let err = repo.insert(&new_file(project_id, "same", None)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_list_labeled_excludes_unlabeled_files() {
        let (repo, project_id) = setup().await;
        let labeled = repo
            .insert(&new_file(project_id, "a", Some("fail")))
            .await
            .unwrap();
        repo.insert(&new_file(project_id, "b", None)).await.unwrap();

        let eligible = repo.list_labeled(project_id).await.unwrap();
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, labeled.id);
        assert_eq!(repo.list_for_project(project_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_count_with_label_ignores_case() {
        let (repo, project_id) = setup().await;
        repo.insert(&new_file(project_id, "a", Some("Pass"))).await.unwrap();
        repo.insert(&new_file(project_id, "b", Some("pass"))).await.unwrap();
        repo.insert(&new_file(project_id, "c", Some("fail"))).await.unwrap();
        repo.insert(&new_file(project_id, "d", None)).await.unwrap();

        assert_eq!(repo.count_with_label(project_id, "PASS").await.unwrap(), 2);
        assert_eq!(repo.count_with_label(project_id, "fail").await.unwrap(), 1);
        assert_eq!(repo.count_with_label(project_id, "ok").await.unwrap(), 0);
        assert_eq!(repo.count_with_label(project_id + 1, "pass").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_set_and_clear_label() {
        let (repo, project_id) = setup().await;
        let file = repo.insert(&new_file(project_id, "a", None)).await.unwrap();

        let labeled = repo.set_human_label(file.id, Some("pass")).await.unwrap();
        assert_eq!(labeled.human_label.as_deref(), Some("pass"));

        let cleared = repo.set_human_label(file.id, None).await.unwrap();
        assert_eq!(cleared.human_label, None);

        repo.delete(file.id).await.unwrap();
        assert!(matches!(
            repo.set_human_label(file.id, None).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_project_violates_constraint() {
        let (repo, project_id) = setup().await;
        let err = repo
            .insert(&new_file(project_id + 100, "orphan", None))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Constraint(_)));
    }
}
