use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Status returned when a write hits a uniqueness constraint.
///
/// Clients of this API expect "303 See Other" rather than "409 Conflict".
pub const CONFLICT_STATUS: StatusCode = StatusCode::SEE_OTHER;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    /// Body, path or query string that could not be parsed.
    Malformed(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::Malformed(e) => write!(f, "Malformed request: {}", e),
        }
    }
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::Conflict { .. }) => CONFLICT_STATUS,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(StorageError::NullField(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) | Self::Malformed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::Storage(e @ (StorageError::Database(_) | StorageError::Migration(_))) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "detail": "An internal error occurred"
                })
            }
            Self::Storage(e) => {
                tracing::debug!("Request rejected: {}", e);
                json!({
                    "detail": e.to_string()
                })
            }
            Self::Validation(errors) => json!({
                "detail": "Validation failed",
                "errors": field_messages(errors, None)
            }),
            Self::Malformed(message) => {
                tracing::debug!("Malformed request: {}", message);
                json!({
                    "detail": message
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

/// Flattens validation errors into `field: message` lines, nested fields
/// joined with dots.
fn field_messages(errors: &ValidationErrors, prefix: Option<&str>) -> Vec<String> {
    errors
        .errors()
        .iter()
        .flat_map(|(field, kind)| {
            let path = match prefix {
                Some(prefix) => format!("{}.{}", prefix, field),
                None => field.to_string(),
            };
            match kind {
                ValidationErrorsKind::Field(errors) => errors
                    .iter()
                    .map(|e| format!("{}: {}", path, describe(e)))
                    .collect(),
                ValidationErrorsKind::Struct(inner) => field_messages(inner, Some(path.as_str())),
                ValidationErrorsKind::List(items) => items
                    .iter()
                    .flat_map(|(index, inner)| {
                        field_messages(inner, Some(format!("{}[{}]", path, index).as_str()))
                    })
                    .collect(),
            }
        })
        .collect()
}

fn describe(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl From<PathRejection> for WebError {
    fn from(rejection: PathRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for WebError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

pub type WebResult<T> = Result<T, WebError>;
