//! Project domain types.
//!
//! A project owns every other entity: labels, dataset files, criterias,
//! inspection specs, prompt templates and evaluation runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A labeling project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
}

/// Partial project update.
///
/// `description` follows the usual `Option<Option<T>>` convention:
/// - `None` = don't change
/// - `Some(None)` = clear
/// - `Some(Some(v))` = set
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub description: Option<Option<String>>,
}

/// A present field (even `null`) becomes `Some`; an absent one stays `None`.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Counts of the entities owned by a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub files: i64,
    pub prompts: i64,
    pub evaluations: i64,
    pub criterias: i64,
    pub inspection_specs: i64,
}

/// A project together with its entity counts.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithStats {
    #[serde(flatten)]
    pub project: Project,
    pub stats: ProjectStats,
}
