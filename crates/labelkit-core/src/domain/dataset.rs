//! Dataset file types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a file entered the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadType {
    Manual,
    Api,
}

impl UploadType {
    /// Parse an upload type from its stored representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(Self::Manual),
            "api" => Some(Self::Api),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Api => "api",
        }
    }
}

/// A file stored in the object store and tracked in a project's dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetFile {
    pub id: i64,
    pub project_id: i64,
    /// Object store key.
    pub file_name: String,
    pub original_name: String,
    pub mime_type: Option<String>,
    pub size: i64,
    /// Human-assigned ground truth. Files without one are not evaluated.
    pub human_label: Option<String>,
    pub upload_type: UploadType,
    pub created_at: DateTime<Utc>,
}

impl DatasetFile {
    /// Whether this file can take part in an evaluation run.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        self.human_label.is_some()
    }

    /// MIME type used when the file is sent to the classifier.
    #[must_use]
    pub fn effective_mime_type(&self) -> &str {
        self.mime_type
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or("application/octet-stream")
    }
}

/// Data for inserting a new dataset file row.
#[derive(Debug, Clone)]
pub struct NewDatasetFile {
    pub project_id: i64,
    pub file_name: String,
    pub original_name: String,
    pub mime_type: Option<String>,
    pub size: i64,
    pub human_label: Option<String>,
    pub upload_type: UploadType,
}
