//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, object storage, LLM provider).
//!
//! # Structure
//!
//! - `project` - Projects and their aggregate statistics
//! - `label` - Project-scoped classification labels
//! - `dataset` - Uploaded dataset files and their ground-truth labels
//! - `criteria` - Pass/fail criteria and per-file criteria examples
//! - `inspection` - Inspection specifications and prompt templates
//! - `evaluation` - Evaluation runs, their state machine and per-file details

pub mod criteria;
pub mod dataset;
pub mod evaluation;
pub mod inspection;
pub mod label;
pub mod project;

pub use criteria::{Criteria, CriteriaExample, NewCriteria};
pub use dataset::{DatasetFile, NewDatasetFile, UploadType};
pub use evaluation::{
    AccuracyBand, EvalDetail, EvalResult, EvaluationOutcome, EvaluationState,
    EvaluationWithDetails, InvalidTransition, NewEvalDetail, NewPromptEvaluation,
    PromptEvaluation, Score,
};
pub use inspection::{InspectionSpec, NewInspectionSpec, NewPromptTemplate, PromptTemplate};
pub use label::{Label, NewLabel};
pub use project::{NewProject, Project, ProjectStats, ProjectUpdate, ProjectWithStats};
