//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` or `reqwest` types in any signature
//! - Repository traits are minimal and CRUD-focused
//! - Object store and classifier ports are intent-based and own their error types

pub mod classifier;
pub mod criteria_repository;
pub mod dataset_repository;
pub mod evaluation_repository;
pub mod inspection_repository;
pub mod label_repository;
pub mod object_store;
pub mod project_repository;

use std::sync::Arc;
use thiserror::Error;

use crate::config::ConfigError;

// Re-export port traits for convenience
pub use classifier::{Classification, ClassificationRequest, ClassifierError, ClassifierPort};
pub use criteria_repository::CriteriaRepository;
pub use dataset_repository::DatasetRepository;
pub use evaluation_repository::EvaluationRepository;
pub use inspection_repository::{InspectionSpecRepository, PromptTemplateRepository};
pub use label_repository::LabelRepository;
pub use object_store::{ObjectStoreError, ObjectStorePort};
pub use project_repository::ProjectRepository;

#[cfg(test)]
pub use classifier::MockClassifierPort;
#[cfg(test)]
pub use evaluation_repository::MockEvaluationRepository;
#[cfg(test)]
pub use inspection_repository::{MockInspectionSpecRepository, MockPromptTemplateRepository};
#[cfg(test)]
pub use label_repository::MockLabelRepository;
#[cfg(test)]
pub use object_store::MockObjectStorePort;

/// Container for all repository trait objects.
///
/// This struct provides a consistent way to wire repositories across adapters
/// without coupling them to concrete implementations. It lives in `labelkit-core`
/// so that `AppCore` can accept it without depending on `labelkit-db`.
///
/// # Example
///
/// ```ignore
/// // In labelkit-db factory:
/// pub fn build_repos(pool: SqlitePool) -> Repos { ... }
///
/// // In adapter bootstrap:
/// let repos = labelkit_db::CoreFactory::build_repos(pool);
/// let core = AppCore::new(repos, store, classifier, config);
/// ```
#[derive(Clone)]
pub struct Repos {
    pub projects: Arc<dyn ProjectRepository>,
    pub labels: Arc<dyn LabelRepository>,
    pub files: Arc<dyn DatasetRepository>,
    pub criterias: Arc<dyn CriteriaRepository>,
    pub specs: Arc<dyn InspectionSpecRepository>,
    pub prompts: Arc<dyn PromptTemplateRepository>,
    pub evaluations: Arc<dyn EvaluationRepository>,
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated (e.g., foreign key, unique constraint).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (HTTP status codes, CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Object store operation failed.
    #[error(transparent)]
    ObjectStore(#[from] ObjectStoreError),

    /// Classification call failed.
    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A referenced entity does not exist (or belongs to another project).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}
