//! Criteria repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Criteria, CriteriaExample, NewCriteria};

/// Repository for criterias and their file examples.
#[async_trait]
pub trait CriteriaRepository: Send + Sync {
    async fn list_for_project(&self, project_id: i64) -> Result<Vec<Criteria>, RepositoryError>;

    async fn get(&self, id: i64) -> Result<Criteria, RepositoryError>;

    async fn insert(&self, criteria: &NewCriteria) -> Result<Criteria, RepositoryError>;

    async fn update(&self, criteria: &Criteria) -> Result<(), RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// Insert or overwrite the example keyed by `(file_id, criteria_id)`.
    async fn upsert_example(&self, example: &CriteriaExample) -> Result<(), RepositoryError>;

    async fn examples_for_file(&self, file_id: i64) -> Result<Vec<CriteriaExample>, RepositoryError>;

    async fn examples_for_criteria(
        &self,
        criteria_id: i64,
    ) -> Result<Vec<CriteriaExample>, RepositoryError>;
}
