//! Label service - project-scoped label management.
//!
//! Files store their human label by name and scoring matches names, so a
//! label some file carries can neither be renamed nor deleted.

use std::sync::Arc;

use crate::domain::{Label, NewLabel};
use crate::ports::{CoreError, DatasetRepository, LabelRepository, ProjectRepository};

use super::{conflict, not_found, require_name};

pub struct LabelService {
    repo: Arc<dyn LabelRepository>,
    projects: Arc<dyn ProjectRepository>,
    files: Arc<dyn DatasetRepository>,
}

impl LabelService {
    pub fn new(
        repo: Arc<dyn LabelRepository>,
        projects: Arc<dyn ProjectRepository>,
        files: Arc<dyn DatasetRepository>,
    ) -> Self {
        Self {
            repo,
            projects,
            files,
        }
    }

    /// List a project's labels, oldest first.
    pub async fn list(&self, project_id: i64) -> Result<Vec<Label>, CoreError> {
        self.projects
            .get(project_id)
            .await
            .map_err(not_found("Project", project_id))?;
        self.repo
            .list_for_project(project_id)
            .await
            .map_err(CoreError::from)
    }

    /// Label names in list order, as substituted into prompts.
    pub async fn names(&self, project_id: i64) -> Result<Vec<String>, CoreError> {
        Ok(self
            .repo
            .list_for_project(project_id)
            .await?
            .into_iter()
            .map(|l| l.name)
            .collect())
    }

    pub async fn get(&self, id: i64) -> Result<Label, CoreError> {
        self.repo.get(id).await.map_err(not_found("Label", id))
    }

    pub async fn create(&self, project_id: i64, name: &str) -> Result<Label, CoreError> {
        let name = require_name("Label name", name)?;
        self.projects
            .get(project_id)
            .await
            .map_err(not_found("Project", project_id))?;
        self.repo
            .insert(&NewLabel { project_id, name })
            .await
            .map_err(conflict)
    }

    /// Rename a label. Only a change of letter case is allowed while files carry it.
    pub async fn rename(&self, id: i64, name: &str) -> Result<Label, CoreError> {
        let name = require_name("Label name", name)?;
        let label = self.get(id).await?;
        if !label.matches(&name) {
            self.ensure_unreferenced(&label).await?;
        }
        self.repo.rename(id, &name).await.map_err(conflict)
    }

    pub async fn delete(&self, id: i64) -> Result<(), CoreError> {
        let label = self.get(id).await?;
        self.ensure_unreferenced(&label).await?;
        self.repo.delete(id).await.map_err(not_found("Label", id))
    }

    async fn ensure_unreferenced(&self, label: &Label) -> Result<(), CoreError> {
        let in_use = self
            .files
            .count_with_label(label.project_id, &label.name)
            .await?;
        if in_use > 0 {
            tracing::debug!(label_id = label.id, in_use, "Label is referenced by files");
            return Err(CoreError::Conflict(format!(
                "Label '{}' is assigned to {in_use} file(s)",
                label.name
            )));
        }
        Ok(())
    }
}
