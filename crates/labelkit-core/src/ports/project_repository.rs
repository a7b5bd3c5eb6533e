//! Project repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewProject, Project, ProjectStats};

/// Repository for project persistence.
///
/// Deleting a project removes every row it owns.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// List all projects, newest first.
    async fn list(&self) -> Result<Vec<Project>, RepositoryError>;

    /// Get a project by ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the project doesn't exist.
    async fn get(&self, id: i64) -> Result<Project, RepositoryError>;

    /// Insert a new project and return it with its assigned ID.
    async fn insert(&self, project: &NewProject) -> Result<Project, RepositoryError>;

    /// Overwrite name and description of an existing project.
    async fn update(&self, project: &Project) -> Result<(), RepositoryError>;

    /// Delete a project and everything it owns.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// Count the entities owned by a project.
    async fn stats(&self, id: i64) -> Result<ProjectStats, RepositoryError>;
}
