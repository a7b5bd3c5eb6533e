#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod ports;
pub mod prompt;
pub mod services;
pub mod templates;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EvaluationConfig};
pub use domain::{
    Criteria, CriteriaExample, DatasetFile, EvalDetail, EvalResult, EvaluationOutcome,
    EvaluationState, EvaluationWithDetails, InspectionSpec, Label, NewCriteria, NewDatasetFile,
    NewEvalDetail, NewInspectionSpec, NewLabel, NewProject, NewPromptEvaluation,
    NewPromptTemplate, Project, ProjectStats, ProjectUpdate, ProjectWithStats, PromptEvaluation,
    PromptTemplate, Score, UploadType,
};
pub use ports::{
    Classification, ClassificationRequest, ClassifierError, ClassifierPort, CoreError,
    CriteriaRepository, DatasetRepository, EvaluationRepository, InspectionSpecRepository,
    LabelRepository, ObjectStoreError, ObjectStorePort, ProjectRepository,
    PromptTemplateRepository, Repos, RepositoryError,
};
pub use services::{AppCore, FileUpload, RunCompletion, StartedEvaluation};

// Dev-dependencies only exercised by the integration tests
#[cfg(test)]
use labelkit_db as _;
