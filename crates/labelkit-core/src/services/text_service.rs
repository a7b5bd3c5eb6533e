//! Services for the two project-owned text stores: inspection specs and
//! prompt templates. Edits overwrite the stored text.

use std::sync::Arc;

use crate::domain::{InspectionSpec, NewInspectionSpec, NewPromptTemplate, PromptTemplate};
use crate::ports::{CoreError, InspectionSpecRepository, ProjectRepository, PromptTemplateRepository};

use super::{not_found, require_name};

// ─────────────────────────────────────────────────────────────────────────────
// Inspection specs
// ─────────────────────────────────────────────────────────────────────────────

pub struct SpecService {
    repo: Arc<dyn InspectionSpecRepository>,
    projects: Arc<dyn ProjectRepository>,
}

impl SpecService {
    pub fn new(
        repo: Arc<dyn InspectionSpecRepository>,
        projects: Arc<dyn ProjectRepository>,
    ) -> Self {
        Self { repo, projects }
    }

    pub async fn list(&self, project_id: i64) -> Result<Vec<InspectionSpec>, CoreError> {
        self.projects
            .get(project_id)
            .await
            .map_err(not_found("Project", project_id))?;
        self.repo
            .list_for_project(project_id)
            .await
            .map_err(CoreError::from)
    }

    pub async fn get(&self, id: i64) -> Result<InspectionSpec, CoreError> {
        self.repo.get(id).await.map_err(not_found("Inspection spec", id))
    }

    pub async fn create(
        &self,
        project_id: i64,
        name: &str,
        text: String,
    ) -> Result<InspectionSpec, CoreError> {
        let name = require_name("Spec name", name)?;
        self.projects
            .get(project_id)
            .await
            .map_err(not_found("Project", project_id))?;
        self.repo
            .insert(&NewInspectionSpec {
                project_id,
                name,
                text,
            })
            .await
            .map_err(CoreError::from)
    }

    pub async fn update(
        &self,
        id: i64,
        name: &str,
        text: String,
    ) -> Result<InspectionSpec, CoreError> {
        let mut spec = self.get(id).await?;
        spec.name = require_name("Spec name", name)?;
        spec.text = text;
        self.repo.update(&spec).await?;
        Ok(spec)
    }

    pub async fn delete(&self, id: i64) -> Result<(), CoreError> {
        self.repo.delete(id).await.map_err(not_found("Inspection spec", id))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Prompt templates
// ─────────────────────────────────────────────────────────────────────────────

pub struct PromptService {
    repo: Arc<dyn PromptTemplateRepository>,
    projects: Arc<dyn ProjectRepository>,
}

impl PromptService {
    pub fn new(
        repo: Arc<dyn PromptTemplateRepository>,
        projects: Arc<dyn ProjectRepository>,
    ) -> Self {
        Self { repo, projects }
    }

    pub async fn list(&self, project_id: i64) -> Result<Vec<PromptTemplate>, CoreError> {
        self.projects
            .get(project_id)
            .await
            .map_err(not_found("Project", project_id))?;
        self.repo
            .list_for_project(project_id)
            .await
            .map_err(CoreError::from)
    }

    pub async fn get(&self, id: i64) -> Result<PromptTemplate, CoreError> {
        self.repo.get(id).await.map_err(not_found("Prompt template", id))
    }

    pub async fn create(
        &self,
        project_id: i64,
        name: &str,
        text: String,
    ) -> Result<PromptTemplate, CoreError> {
        let name = require_name("Prompt name", name)?;
        self.projects
            .get(project_id)
            .await
            .map_err(not_found("Project", project_id))?;
        self.repo
            .insert(&NewPromptTemplate {
                project_id,
                name,
                text,
            })
            .await
            .map_err(CoreError::from)
    }

    pub async fn update(
        &self,
        id: i64,
        name: &str,
        text: String,
    ) -> Result<PromptTemplate, CoreError> {
        let mut prompt = self.get(id).await?;
        prompt.name = require_name("Prompt name", name)?;
        prompt.text = text;
        self.repo.update(&prompt).await?;
        Ok(prompt)
    }

    pub async fn delete(&self, id: i64) -> Result<(), CoreError> {
        self.repo.delete(id).await.map_err(not_found("Prompt template", id))
    }
}
