//! Request and response bodies that exist only at the HTTP boundary.
//!
//! Domain types from `labelkit-core` are serialized directly; these cover
//! request shapes and small wrapper responses.

use serde::{Deserialize, Serialize};

/// Body for creating or renaming a label.
#[derive(Debug, Deserialize)]
pub struct LabelRequest {
    pub name: String,
}

/// Body for creating or overwriting an inspection spec or prompt template.
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CriteriaRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body for `PUT /api/files/{id}/label`. `null` or a blank name clears the label.
#[derive(Debug, Deserialize)]
pub struct LabelAssignment {
    #[serde(default)]
    pub label: Option<String>,
}

/// Body for `PUT /api/files/{id}/criterias/{criteria_id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaExampleRequest {
    #[serde(alias = "is_fail")]
    pub is_fail: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Body for `POST /api/projects/{id}/evaluations`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartEvaluationRequest {
    #[serde(alias = "prompt_id")]
    pub prompt_id: i64,
    #[serde(alias = "spec_id")]
    pub spec_id: i64,
}

/// Query string or form body for `POST /api/evaluate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateParams {
    #[serde(alias = "project_id")]
    pub project_id: Option<i64>,
    #[serde(alias = "prompt_id")]
    pub prompt_id: Option<i64>,
    #[serde(alias = "spec_id")]
    pub spec_id: Option<i64>,
}

/// Query of a presigned download URL.
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub expires: u64,
    pub signature: String,
}

/// `202 Accepted` body for a started run.
#[derive(Debug, Serialize)]
pub struct StartedRun {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub url: String,
}

/// Built-in starter texts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatesResponse {
    pub prompt_template: &'static str,
    pub inspection_spec: &'static str,
}
