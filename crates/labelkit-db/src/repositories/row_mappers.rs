//! Row types and mapping helpers for `SQLite` queries.
//!
//! Each table has a `FromRow` struct mirroring its columns and a conversion
//! into the domain type. Enum columns are stored as lowercase text.

use chrono::{DateTime, NaiveDateTime, Utc};
use labelkit_core::{
    Criteria, CriteriaExample, DatasetFile, EvalDetail, EvalResult, EvaluationState,
    InspectionSpec, Label, Project, PromptEvaluation, PromptTemplate, RepositoryError, UploadType,
};

/// Parse a `SQLite` timestamp (`YYYY-MM-DD HH:MM:SS[.fff]`, optionally suffixed `UTC`).
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    let trimmed = s.trim_end_matches(" UTC");
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f")
        .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
        .map_err(|e| RepositoryError::Serialization(format!("bad timestamp '{s}': {e}")))
}

/// Map `SQLx` errors to `RepositoryError`.
pub fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    let msg = e.to_string();
    if msg.contains("UNIQUE constraint failed") {
        return RepositoryError::AlreadyExists(msg);
    }
    if msg.contains("FOREIGN KEY constraint failed") || msg.contains("CHECK constraint failed") {
        return RepositoryError::Constraint(msg);
    }
    RepositoryError::Storage(msg)
}

/// `NotFound` for a missing row.
pub fn missing(table: &str, id: i64) -> RepositoryError {
    RepositoryError::NotFound(format!("{table} id={id}"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared SELECT column lists
// ─────────────────────────────────────────────────────────────────────────────

pub const FILE_COLUMNS: &str = "id, project_id, file_name, original_name, mime_type, size, human_label, upload_type, created_at";

pub const EVALUATION_COLUMNS: &str = "id, project_id, prompt_id, spec_id, final_prompt, state, score, duration_secs, num_dataset, analysis_text, created_at";

pub const DETAIL_COLUMNS: &str =
    "id, file_id, prompt_eval_id, llm_label, llm_reason, result, created_at";

// ─────────────────────────────────────────────────────────────────────────────
// Row types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(sqlx::FromRow)]
pub struct ProjectRow {
    id: i64,
    name: String,
    description: Option<String>,
    created_at: String,
}

impl TryFrom<ProjectRow> for Project {
    type Error = RepositoryError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct LabelRow {
    id: i64,
    project_id: i64,
    name: String,
    created_at: String,
}

impl TryFrom<LabelRow> for Label {
    type Error = RepositoryError;

    fn try_from(row: LabelRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            project_id: row.project_id,
            name: row.name,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct FileRow {
    id: i64,
    project_id: i64,
    file_name: String,
    original_name: String,
    mime_type: Option<String>,
    size: i64,
    human_label: Option<String>,
    upload_type: String,
    created_at: String,
}

impl TryFrom<FileRow> for DatasetFile {
    type Error = RepositoryError;

    fn try_from(row: FileRow) -> Result<Self, Self::Error> {
        let upload_type = UploadType::parse(&row.upload_type).ok_or_else(|| {
            RepositoryError::Serialization(format!("unknown upload type '{}'", row.upload_type))
        })?;
        Ok(Self {
            id: row.id,
            project_id: row.project_id,
            file_name: row.file_name,
            original_name: row.original_name,
            mime_type: row.mime_type,
            size: row.size,
            human_label: row.human_label,
            upload_type,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct CriteriaRow {
    id: i64,
    project_id: i64,
    name: String,
    description: Option<String>,
    created_at: String,
}

impl TryFrom<CriteriaRow> for Criteria {
    type Error = RepositoryError;

    fn try_from(row: CriteriaRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            project_id: row.project_id,
            name: row.name,
            description: row.description,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct CriteriaExampleRow {
    file_id: i64,
    criteria_id: i64,
    is_fail: bool,
    reason: Option<String>,
}

impl From<CriteriaExampleRow> for CriteriaExample {
    fn from(row: CriteriaExampleRow) -> Self {
        Self {
            file_id: row.file_id,
            criteria_id: row.criteria_id,
            is_fail: row.is_fail,
            reason: row.reason,
        }
    }
}

/// Shared shape of `inspection_specs` and `prompt_templates`.
#[derive(sqlx::FromRow)]
pub struct TextRow {
    id: i64,
    project_id: i64,
    name: String,
    text: String,
    created_at: String,
}

impl TryFrom<TextRow> for InspectionSpec {
    type Error = RepositoryError;

    fn try_from(row: TextRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            project_id: row.project_id,
            name: row.name,
            text: row.text,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

impl TryFrom<TextRow> for PromptTemplate {
    type Error = RepositoryError;

    fn try_from(row: TextRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            project_id: row.project_id,
            name: row.name,
            text: row.text,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct EvaluationRow {
    id: i64,
    project_id: i64,
    prompt_id: i64,
    spec_id: i64,
    final_prompt: String,
    state: String,
    score: Option<f64>,
    duration_secs: Option<i64>,
    num_dataset: Option<i64>,
    analysis_text: Option<String>,
    created_at: String,
}

impl TryFrom<EvaluationRow> for PromptEvaluation {
    type Error = RepositoryError;

    fn try_from(row: EvaluationRow) -> Result<Self, Self::Error> {
        let state = EvaluationState::parse(&row.state).ok_or_else(|| {
            RepositoryError::Serialization(format!("unknown evaluation state '{}'", row.state))
        })?;
        Ok(Self {
            id: row.id,
            project_id: row.project_id,
            prompt_id: row.prompt_id,
            spec_id: row.spec_id,
            final_prompt: row.final_prompt,
            state,
            score: row.score,
            duration_secs: row.duration_secs,
            num_dataset: row.num_dataset,
            analysis_text: row.analysis_text,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct DetailRow {
    id: i64,
    file_id: i64,
    prompt_eval_id: i64,
    llm_label: String,
    llm_reason: String,
    result: String,
    created_at: String,
}

impl TryFrom<DetailRow> for EvalDetail {
    type Error = RepositoryError;

    fn try_from(row: DetailRow) -> Result<Self, Self::Error> {
        let result = EvalResult::parse(&row.result).ok_or_else(|| {
            RepositoryError::Serialization(format!("unknown eval result '{}'", row.result))
        })?;
        Ok(Self {
            id: row.id,
            file_id: row.file_id,
            prompt_eval_id: row.prompt_eval_id,
            llm_label: row.llm_label,
            llm_reason: row.llm_reason,
            result,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

/// Convert a batch of rows, failing on the first bad one.
pub fn collect_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, RepositoryError>
where
    T: TryFrom<R, Error = RepositoryError>,
{
    rows.into_iter().map(T::try_from).collect()
}
