//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Registry API                       │
//! │                                                                         │
//! │  Handler: Result<T, ApiError>                                          │
//! │         │                                                               │
//! │         ├── ValidationErrors ──────────► 422 every offending field     │
//! │         │                                                               │
//! │         ├── DbError::ConstraintViolation ► 409 naming the field        │
//! │         │                                                               │
//! │         ├── Ok(None) / Ok(false) ───────► 404 "User not found"         │
//! │         │                                                               │
//! │         └── any other DbError ──────────► error! + correlation id      │
//! │                                            503 (Unavailable) / 500      │
//! │                                                                         │
//! │  Raw SQLite text never reaches the client; the correlation id ties     │
//! │  the client-visible 5xx to the logged detail.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Response Bodies
//! ```json
//! 422 { "detail": "Validation failed",
//!       "errors": [ { "field": "email", "kind": "invalid_format", "message": "..." } ] }
//! 409 { "detail": "Email already registered", "field": "email" }
//! 404 { "detail": "User not found" }
//! 500 { "detail": "Internal server error", "correlation_id": "..." }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use registry_core::ValidationErrors;
use registry_db::DbError;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned from HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more input fields are invalid (422).
    #[error("{0}")]
    Validation(ValidationErrors),

    /// A uniqueness or reference rule rejected the write (409).
    #[error("Conflict on {field}")]
    Conflict { field: String },

    /// The requested student does not exist (404).
    #[error("User not found")]
    NotFound,

    /// Storage cannot be reached (503). Detail is in the log only.
    #[error("Service unavailable (correlation id {correlation_id})")]
    Unavailable { correlation_id: Uuid },

    /// Unexpected fault (500). Detail is in the log only.
    #[error("Internal server error (correlation id {correlation_id})")]
    Internal { correlation_id: Uuid },
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Client-facing message for a conflicting field.
fn conflict_detail(field: &str) -> String {
    match field {
        "email" => "Email already registered".to_string(),
        "status_code" => "Unknown status_code".to_string(),
        "student_id" => "Student does not exist".to_string(),
        other => format!("Conflicting value for {}", other),
    }
}

// =============================================================================
// Response Bodies
// =============================================================================

#[derive(Debug, Serialize)]
struct DetailBody {
    detail: String,
}

#[derive(Debug, Serialize)]
struct ConflictBody {
    detail: String,
    field: String,
}

#[derive(Debug, Serialize)]
struct FieldViolation {
    field: String,
    kind: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct ValidationBody {
    detail: &'static str,
    errors: Vec<FieldViolation>,
}

#[derive(Debug, Serialize)]
struct FaultBody {
    detail: &'static str,
    correlation_id: Uuid,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            ApiError::Validation(errors) => {
                let body = ValidationBody {
                    detail: "Validation failed",
                    errors: errors
                        .iter()
                        .map(|e| FieldViolation {
                            field: e.field().to_string(),
                            kind: e.kind(),
                            message: e.to_string(),
                        })
                        .collect(),
                };
                (status, Json(body)).into_response()
            }
            ApiError::Conflict { field } => {
                let body = ConflictBody {
                    detail: conflict_detail(&field),
                    field,
                };
                (status, Json(body)).into_response()
            }
            ApiError::NotFound => {
                let body = DetailBody {
                    detail: "User not found".to_string(),
                };
                (status, Json(body)).into_response()
            }
            ApiError::Unavailable { correlation_id } | ApiError::Internal { correlation_id } => {
                let body = FaultBody {
                    detail: "Internal server error",
                    correlation_id,
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        debug!(fields = ?errors.fields(), "Rejected invalid input");
        ApiError::Validation(errors)
    }
}

/// Converts database errors to API errors.
///
/// Faults are logged here with full detail, once, under a fresh correlation id.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        if err.is_fault() {
            let correlation_id = Uuid::new_v4();
            error!(%correlation_id, error = %err, "Database operation failed");
            return match err {
                DbError::Unavailable(_) => ApiError::Unavailable { correlation_id },
                _ => ApiError::Internal { correlation_id },
            };
        }

        info!(error = %err, "Write rejected by constraint");
        match err {
            DbError::ConstraintViolation { field } => ApiError::Conflict { field },
            _ => ApiError::Conflict {
                field: "reference".to_string(),
            },
        }
    }
}
