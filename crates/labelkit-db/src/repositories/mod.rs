//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod row_mappers;
mod sqlite_criteria_repository;
mod sqlite_dataset_repository;
mod sqlite_evaluation_repository;
mod sqlite_inspection_repository;
mod sqlite_label_repository;
mod sqlite_project_repository;

pub use sqlite_criteria_repository::SqliteCriteriaRepository;
pub use sqlite_dataset_repository::SqliteDatasetRepository;
pub use sqlite_evaluation_repository::SqliteEvaluationRepository;
pub use sqlite_inspection_repository::{
    SqliteInspectionSpecRepository, SqlitePromptTemplateRepository,
};
pub use sqlite_label_repository::SqliteLabelRepository;
pub use sqlite_project_repository::SqliteProjectRepository;
