//! Dataset service - file upload, labeling and removal.
//!
//! Blob bytes live in the object store under a generated key; the row in the
//! dataset repository points at that key. Upload writes the blob first and
//! removes it again if the row cannot be written.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::domain::{DatasetFile, NewDatasetFile, UploadType};
use crate::ports::{
    CoreError, DatasetRepository, LabelRepository, ObjectStorePort, ProjectRepository,
};

use super::not_found;

/// A file to add to a project's dataset.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub project_id: i64,
    pub original_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
    pub human_label: Option<String>,
    pub upload_type: UploadType,
}

/// Reduce a client-supplied file name to a safe object key suffix.
///
/// Path components are dropped and anything outside `[A-Za-z0-9._-]` becomes `_`.
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

pub struct DatasetService {
    repo: Arc<dyn DatasetRepository>,
    labels: Arc<dyn LabelRepository>,
    projects: Arc<dyn ProjectRepository>,
    store: Arc<dyn ObjectStorePort>,
    presign_ttl: Duration,
}

impl DatasetService {
    pub fn new(
        repo: Arc<dyn DatasetRepository>,
        labels: Arc<dyn LabelRepository>,
        projects: Arc<dyn ProjectRepository>,
        store: Arc<dyn ObjectStorePort>,
        presign_ttl: Duration,
    ) -> Self {
        Self {
            repo,
            labels,
            projects,
            store,
            presign_ttl,
        }
    }

    /// List a project's files, newest first.
    pub async fn list(&self, project_id: i64) -> Result<Vec<DatasetFile>, CoreError> {
        self.projects
            .get(project_id)
            .await
            .map_err(not_found("Project", project_id))?;
        self.repo
            .list_for_project(project_id)
            .await
            .map_err(CoreError::from)
    }

    pub async fn get(&self, id: i64) -> Result<DatasetFile, CoreError> {
        self.repo.get(id).await.map_err(not_found("File", id))
    }

    /// Store a new file and record it in the dataset.
    pub async fn upload(&self, upload: FileUpload) -> Result<DatasetFile, CoreError> {
        self.projects
            .get(upload.project_id)
            .await
            .map_err(not_found("Project", upload.project_id))?;

        let human_label = match upload.human_label.as_deref() {
            Some(label) => Some(self.canonical_label(upload.project_id, label).await?),
            None => None,
        };

        let key = format!(
            "{}-{}",
            Uuid::new_v4(),
            sanitize_file_name(&upload.original_name)
        );
        if self.store.stat(&key).await? {
            return Err(CoreError::Conflict(format!("File already exists: {key}")));
        }

        let size = i64::try_from(upload.bytes.len())
            .map_err(|_| CoreError::Validation("File too large".to_string()))?;
        self.store
            .put(&key, upload.bytes, upload.mime_type.clone())
            .await?;

        let row = NewDatasetFile {
            project_id: upload.project_id,
            file_name: key.clone(),
            original_name: upload.original_name,
            mime_type: upload.mime_type,
            size,
            human_label,
            upload_type: upload.upload_type,
        };

        match self.repo.insert(&row).await {
            Ok(file) => {
                tracing::debug!(
                    project_id = file.project_id,
                    file_id = file.id,
                    key = %file.file_name,
                    "Dataset file uploaded"
                );
                Ok(file)
            }
            Err(e) => {
                if let Err(cleanup) = self.store.delete(&key).await {
                    tracing::warn!(key = %key, error = %cleanup, "Failed to remove orphaned object");
                }
                Err(e.into())
            }
        }
    }

    /// Set or clear a file's ground-truth label.
    pub async fn set_label(&self, id: i64, label: Option<&str>) -> Result<DatasetFile, CoreError> {
        let file = self.get(id).await?;
        let label = match label.map(str::trim).filter(|l| !l.is_empty()) {
            Some(l) => Some(self.canonical_label(file.project_id, l).await?),
            None => None,
        };
        self.repo
            .set_human_label(id, label.as_deref())
            .await
            .map_err(CoreError::from)
    }

    /// Remove the blob, then the row.
    pub async fn delete(&self, id: i64) -> Result<(), CoreError> {
        let file = self.get(id).await?;
        self.store.delete(&file.file_name).await?;
        self.repo.delete(id).await?;
        tracing::debug!(file_id = id, key = %file.file_name, "Dataset file deleted");
        Ok(())
    }

    /// Time-limited download URL for a file.
    pub async fn presigned_url(&self, id: i64) -> Result<String, CoreError> {
        let file = self.get(id).await?;
        self.store
            .presigned_get_url(&file.file_name, self.presign_ttl)
            .await
            .map_err(CoreError::from)
    }

    /// Resolve a label name against the project's labels, returning the stored spelling.
    async fn canonical_label(&self, project_id: i64, name: &str) -> Result<String, CoreError> {
        self.labels
            .list_for_project(project_id)
            .await?
            .into_iter()
            .find(|l| l.matches(name))
            .map(|l| l.name)
            .ok_or_else(|| {
                CoreError::Validation(format!("Unknown label '{}' for project {project_id}", name.trim()))
            })
    }
}
