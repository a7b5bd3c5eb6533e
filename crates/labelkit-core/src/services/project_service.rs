//! Project service - project CRUD and cascading deletion.

use std::sync::Arc;

use crate::domain::label::DEFAULT_LABELS;
use crate::domain::{NewLabel, NewProject, Project, ProjectStats, ProjectUpdate, ProjectWithStats};
use crate::ports::{
    CoreError, DatasetRepository, LabelRepository, ObjectStorePort, ProjectRepository,
};

use super::{not_found, require_name};

pub struct ProjectService {
    repo: Arc<dyn ProjectRepository>,
    labels: Arc<dyn LabelRepository>,
    files: Arc<dyn DatasetRepository>,
    store: Arc<dyn ObjectStorePort>,
}

impl ProjectService {
    pub fn new(
        repo: Arc<dyn ProjectRepository>,
        labels: Arc<dyn LabelRepository>,
        files: Arc<dyn DatasetRepository>,
        store: Arc<dyn ObjectStorePort>,
    ) -> Self {
        Self {
            repo,
            labels,
            files,
            store,
        }
    }

    /// List all projects.
    pub async fn list(&self) -> Result<Vec<Project>, CoreError> {
        self.repo.list().await.map_err(CoreError::from)
    }

    /// Get a project by ID.
    pub async fn get(&self, id: i64) -> Result<Project, CoreError> {
        self.repo.get(id).await.map_err(not_found("Project", id))
    }

    /// Entity counts for a project.
    pub async fn stats(&self, id: i64) -> Result<ProjectStats, CoreError> {
        self.get(id).await?;
        self.repo.stats(id).await.map_err(CoreError::from)
    }

    pub async fn get_with_stats(&self, id: i64) -> Result<ProjectWithStats, CoreError> {
        let project = self.get(id).await?;
        let stats = self.repo.stats(id).await?;
        Ok(ProjectWithStats { project, stats })
    }

    /// Create a project and seed its default labels.
    pub async fn create(&self, project: NewProject) -> Result<Project, CoreError> {
        let project = NewProject {
            name: require_name("Project name", &project.name)?,
            description: project.description,
        };
        let created = self.repo.insert(&project).await?;

        for name in DEFAULT_LABELS {
            self.labels
                .insert(&NewLabel {
                    project_id: created.id,
                    name: name.to_string(),
                })
                .await?;
        }

        tracing::info!(project_id = created.id, name = %created.name, "Project created");
        Ok(created)
    }

    /// Apply a partial update.
    pub async fn update(&self, id: i64, update: ProjectUpdate) -> Result<Project, CoreError> {
        let mut project = self.get(id).await?;
        if let Some(name) = update.name {
            project.name = require_name("Project name", &name)?;
        }
        if let Some(description) = update.description {
            project.description = description;
        }
        self.repo.update(&project).await?;
        Ok(project)
    }

    /// Delete a project, its rows and (best effort) the blobs of its files.
    pub async fn delete(&self, id: i64) -> Result<(), CoreError> {
        self.get(id).await?;

        for file in self.files.list_for_project(id).await? {
            if let Err(e) = self.store.delete(&file.file_name).await {
                tracing::warn!(
                    project_id = id,
                    key = %file.file_name,
                    error = %e,
                    "Failed to delete object while deleting project"
                );
            }
        }

        self.repo.delete(id).await?;
        tracing::info!(project_id = id, "Project deleted");
        Ok(())
    }
}
