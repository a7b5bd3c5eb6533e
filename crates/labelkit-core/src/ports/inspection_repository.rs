//! Inspection spec and prompt template repository traits.
//!
//! Both stores hold version-less text owned by a project: `update` overwrites.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{InspectionSpec, NewInspectionSpec, NewPromptTemplate, PromptTemplate};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InspectionSpecRepository: Send + Sync {
    async fn list_for_project(&self, project_id: i64)
    -> Result<Vec<InspectionSpec>, RepositoryError>;

    async fn get(&self, id: i64) -> Result<InspectionSpec, RepositoryError>;

    async fn insert(&self, spec: &NewInspectionSpec) -> Result<InspectionSpec, RepositoryError>;

    async fn update(&self, spec: &InspectionSpec) -> Result<(), RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PromptTemplateRepository: Send + Sync {
    async fn list_for_project(&self, project_id: i64)
    -> Result<Vec<PromptTemplate>, RepositoryError>;

    async fn get(&self, id: i64) -> Result<PromptTemplate, RepositoryError>;

    async fn insert(&self, prompt: &NewPromptTemplate) -> Result<PromptTemplate, RepositoryError>;

    async fn update(&self, prompt: &PromptTemplate) -> Result<(), RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
