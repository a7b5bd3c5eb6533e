//! Criteria domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named pass/fail criterion within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a criteria.
#[derive(Debug, Clone)]
pub struct NewCriteria {
    pub project_id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// A file used as an example for a criteria, marked as passing or failing it.
///
/// Unique per `(file_id, criteria_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaExample {
    pub file_id: i64,
    pub criteria_id: i64,
    pub is_fail: bool,
    pub reason: Option<String>,
}
