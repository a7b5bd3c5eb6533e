//! Criteria service - criterias and the files that exemplify them.

use std::sync::Arc;

use crate::domain::{Criteria, CriteriaExample, NewCriteria};
use crate::ports::{CoreError, CriteriaRepository, DatasetRepository, ProjectRepository};

use super::{not_found, require_name};

pub struct CriteriaService {
    repo: Arc<dyn CriteriaRepository>,
    projects: Arc<dyn ProjectRepository>,
    files: Arc<dyn DatasetRepository>,
}

impl CriteriaService {
    pub fn new(
        repo: Arc<dyn CriteriaRepository>,
        projects: Arc<dyn ProjectRepository>,
        files: Arc<dyn DatasetRepository>,
    ) -> Self {
        Self {
            repo,
            projects,
            files,
        }
    }

    pub async fn list(&self, project_id: i64) -> Result<Vec<Criteria>, CoreError> {
        self.projects
            .get(project_id)
            .await
            .map_err(not_found("Project", project_id))?;
        self.repo
            .list_for_project(project_id)
            .await
            .map_err(CoreError::from)
    }

    pub async fn get(&self, id: i64) -> Result<Criteria, CoreError> {
        self.repo.get(id).await.map_err(not_found("Criteria", id))
    }

    pub async fn create(
        &self,
        project_id: i64,
        name: &str,
        description: Option<String>,
    ) -> Result<Criteria, CoreError> {
        let name = require_name("Criteria name", name)?;
        self.projects
            .get(project_id)
            .await
            .map_err(not_found("Project", project_id))?;
        self.repo
            .insert(&NewCriteria {
                project_id,
                name,
                description,
            })
            .await
            .map_err(CoreError::from)
    }

    pub async fn update(
        &self,
        id: i64,
        name: &str,
        description: Option<String>,
    ) -> Result<Criteria, CoreError> {
        let mut criteria = self.get(id).await?;
        criteria.name = require_name("Criteria name", name)?;
        criteria.description = description;
        self.repo.update(&criteria).await?;
        Ok(criteria)
    }

    pub async fn delete(&self, id: i64) -> Result<(), CoreError> {
        self.repo.delete(id).await.map_err(not_found("Criteria", id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Examples
    // ─────────────────────────────────────────────────────────────────────────

    /// Mark a file as a passing or failing example of a criteria.
    ///
    /// Overwrites any previous marking for the same pair.
    pub async fn set_example(&self, example: CriteriaExample) -> Result<CriteriaExample, CoreError> {
        let file = self
            .files
            .get(example.file_id)
            .await
            .map_err(not_found("File", example.file_id))?;
        let criteria = self.get(example.criteria_id).await?;
        if file.project_id != criteria.project_id {
            return Err(CoreError::Validation(format!(
                "File {} and criteria {} belong to different projects",
                file.id, criteria.id
            )));
        }

        self.repo.upsert_example(&example).await?;
        Ok(example)
    }

    pub async fn examples_for_file(&self, file_id: i64) -> Result<Vec<CriteriaExample>, CoreError> {
        self.files
            .get(file_id)
            .await
            .map_err(not_found("File", file_id))?;
        self.repo
            .examples_for_file(file_id)
            .await
            .map_err(CoreError::from)
    }

    pub async fn examples_for_criteria(
        &self,
        criteria_id: i64,
    ) -> Result<Vec<CriteriaExample>, CoreError> {
        self.get(criteria_id).await?;
        self.repo
            .examples_for_criteria(criteria_id)
            .await
            .map_err(CoreError::from)
    }
}
