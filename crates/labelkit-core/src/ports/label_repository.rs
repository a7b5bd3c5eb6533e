//! Label repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Label, NewLabel};

/// Repository for project-scoped labels.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LabelRepository: Send + Sync {
    /// List the labels of a project, oldest first.
    async fn list_for_project(&self, project_id: i64) -> Result<Vec<Label>, RepositoryError>;

    async fn get(&self, id: i64) -> Result<Label, RepositoryError>;

    /// Insert a label.
    ///
    /// Returns `Err(RepositoryError::AlreadyExists)` if the project already has a
    /// label with the same case-insensitive name.
    async fn insert(&self, label: &NewLabel) -> Result<Label, RepositoryError>;

    /// Rename a label. Same uniqueness rule as `insert`.
    async fn rename(&self, id: i64, name: &str) -> Result<Label, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
