//! Composition utilities for building `AppCore` with `SQLite` backends.
//!
//! This module provides factory functions for wiring up the application
//! with `SQLite` repositories. It is focused purely on construction and
//! should not contain any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use labelkit_core::ports::{ClassifierPort, ObjectStorePort};
use labelkit_core::services::AppCore;
use labelkit_core::{EvaluationConfig, Repos};

use crate::repositories::{
    SqliteCriteriaRepository, SqliteDatasetRepository, SqliteEvaluationRepository,
    SqliteInspectionSpecRepository, SqliteLabelRepository, SqliteProjectRepository,
    SqlitePromptTemplateRepository,
};

/// Factory for creating repository instances with `SQLite` backends.
///
/// This struct provides composition utilities only - no domain logic.
pub struct CoreFactory;

impl CoreFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// This is the recommended way for adapters to obtain repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos {
            projects: Arc::new(SqliteProjectRepository::new(pool.clone())),
            labels: Arc::new(SqliteLabelRepository::new(pool.clone())),
            files: Arc::new(SqliteDatasetRepository::new(pool.clone())),
            criterias: Arc::new(SqliteCriteriaRepository::new(pool.clone())),
            specs: Arc::new(SqliteInspectionSpecRepository::new(pool.clone())),
            prompts: Arc::new(SqlitePromptTemplateRepository::new(pool.clone())),
            evaluations: Arc::new(SqliteEvaluationRepository::new(pool)),
        }
    }

    /// Build a complete `AppCore` from a pool and the non-database adapters.
    ///
    /// Equivalent to:
    ///
    /// ```ignore
    /// let repos = CoreFactory::build_repos(pool);
    /// let core = AppCore::new(repos, store, classifier, config);
    /// ```
    pub fn build_app_core(
        pool: SqlitePool,
        store: Arc<dyn ObjectStorePort>,
        classifier: Arc<dyn ClassifierPort>,
        config: EvaluationConfig,
    ) -> AppCore {
        AppCore::new(Self::build_repos(pool), store, classifier, config)
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the underlying pool.
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All repositories backed by this database.
    pub fn repos(&self) -> Repos {
        CoreFactory::build_repos(self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelkit_core::NewProject;

    #[tokio::test]
    async fn test_repos_share_one_database() {
        let db = TestDb::new().await.unwrap();
        let repos = db.repos();
        let project = repos
            .projects
            .insert(&NewProject {
                name: "shared".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let other = db.repos();
        assert_eq!(other.projects.get(project.id).await.unwrap().name, "shared");
        assert!(other.labels.list_for_project(project.id).await.unwrap().is_empty());
    }
}
