//! Dataset file repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{DatasetFile, NewDatasetFile};

/// Repository for dataset file rows. Blob content lives in the object store.
#[async_trait]
pub trait DatasetRepository: Send + Sync {
    /// List all files of a project, newest first.
    async fn list_for_project(&self, project_id: i64) -> Result<Vec<DatasetFile>, RepositoryError>;

    /// List the files of a project that carry a human label.
    async fn list_labeled(&self, project_id: i64) -> Result<Vec<DatasetFile>, RepositoryError>;

    /// Count the project's files whose human label matches `label`, case-insensitively.
    async fn count_with_label(&self, project_id: i64, label: &str) -> Result<u64, RepositoryError>;

    async fn get(&self, id: i64) -> Result<DatasetFile, RepositoryError>;

    async fn insert(&self, file: &NewDatasetFile) -> Result<DatasetFile, RepositoryError>;

    /// Set or clear the human label of a file.
    async fn set_human_label(
        &self,
        id: i64,
        label: Option<&str>,
    ) -> Result<DatasetFile, RepositoryError>;

    /// Delete a file row. Criteria examples and eval details referencing it go with it.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
