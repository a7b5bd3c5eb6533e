//! Classification label types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label names seeded into every new project.
pub const DEFAULT_LABELS: [&str; 2] = ["pass", "fail"];

/// A named class that files can be labeled with.
///
/// Labels are scoped to a project and unique within it by case-insensitive name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Label {
    /// Case-insensitive name comparison, the only equality the evaluation
    /// pipeline applies to labels.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}

/// Data for creating a new label.
#[derive(Debug, Clone)]
pub struct NewLabel {
    pub project_id: i64,
    pub name: String,
}
