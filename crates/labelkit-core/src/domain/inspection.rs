//! Inspection specification and prompt template types.
//!
//! Both are free text blobs owned by a project. They are version-less:
//! edits overwrite the stored text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inspection specification text substituted for `{{INSPECTION_SPEC}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionSpec {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewInspectionSpec {
    pub project_id: i64,
    pub name: String,
    pub text: String,
}

/// Prompt template text with `{{INSPECTION_SPEC}}` and `{{LABELS}}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPromptTemplate {
    pub project_id: i64,
    pub name: String,
    pub text: String,
}
