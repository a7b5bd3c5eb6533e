//! Axum-specific error types and mappings.
//!
//! Maps `CoreError` and its sources to HTTP status codes and JSON bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use labelkit_core::{ClassifierError, CoreError, ObjectStoreError, RepositoryError};
use labelkit_storage::SignatureError;
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Conflict (resource already exists).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, expired or tampered download signature.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Service unavailable (object store or classifier down).
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
        }
        let message = match self {
            Self::NotFound(msg)
            | Self::BadRequest(msg)
            | Self::Conflict(msg)
            | Self::Unauthorized(msg)
            | Self::ServiceUnavailable(msg)
            | Self::Internal(msg) => msg,
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => repo_err.into(),
            CoreError::ObjectStore(store_err) => store_err.into(),
            CoreError::Classifier(classifier_err) => classifier_err.into(),
            CoreError::Config(config_err) => Self::BadRequest(config_err.to_string()),
            CoreError::NotFound(msg) => Self::NotFound(msg),
            CoreError::Validation(msg) => Self::BadRequest(msg),
            CoreError::Conflict(msg) => Self::Conflict(msg),
            CoreError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<RepositoryError> for HttpError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Self::NotFound(msg),
            RepositoryError::AlreadyExists(msg) => Self::Conflict(msg),
            RepositoryError::Storage(msg) => Self::Internal(format!("Storage: {msg}")),
            RepositoryError::Serialization(msg) => Self::Internal(format!("Serialization: {msg}")),
            RepositoryError::Constraint(msg) => Self::BadRequest(msg),
        }
    }
}

impl From<ObjectStoreError> for HttpError {
    fn from(err: ObjectStoreError) -> Self {
        match err {
            ObjectStoreError::NotFound(key) => Self::NotFound(format!("Object {key}")),
            err @ ObjectStoreError::InvalidKey { .. } => Self::BadRequest(err.to_string()),
            ObjectStoreError::Unavailable(msg) => Self::ServiceUnavailable(msg),
            ObjectStoreError::Backend(msg) => Self::Internal(format!("Object store: {msg}")),
        }
    }
}

impl From<ClassifierError> for HttpError {
    fn from(err: ClassifierError) -> Self {
        Self::ServiceUnavailable(err.to_string())
    }
}

impl From<SignatureError> for HttpError {
    fn from(err: SignatureError) -> Self {
        match err {
            SignatureError::Key(_) => Self::Internal(err.to_string()),
            SignatureError::Expired | SignatureError::Invalid => {
                Self::Unauthorized(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_statuses() {
        let cases = [
            (CoreError::NotFound("Project 1".into()), StatusCode::NOT_FOUND),
            (CoreError::Validation("empty".into()), StatusCode::BAD_REQUEST),
            (CoreError::Conflict("dup".into()), StatusCode::CONFLICT),
            (CoreError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                RepositoryError::AlreadyExists("label".into()).into(),
                StatusCode::CONFLICT,
            ),
            (
                ObjectStoreError::Unavailable("down".into()).into(),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ObjectStoreError::NotFound("k".into()).into(),
                StatusCode::NOT_FOUND,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(HttpError::from(err).status(), status);
        }
    }

    #[test]
    fn test_signature_errors_are_unauthorized() {
        assert_eq!(
            HttpError::from(SignatureError::Expired).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            HttpError::from(SignatureError::Key("bad".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
