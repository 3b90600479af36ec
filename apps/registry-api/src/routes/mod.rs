//! # HTTP Routes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST   /create_user/          students::create_user                   │
//! │  GET    /read_users/           students::read_users                    │
//! │  GET    /read_user/{id}        students::read_user                     │
//! │  GET    /read_user_full/{id}   students::read_user_full                │
//! │  DELETE /user_delete/{id}      students::delete_user                   │
//! │  POST   /create_extra_info/    extra_info::create_extra_info           │
//! │  GET    /read_statuses/        statuses::read_statuses                 │
//! │  GET    /health                health                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use registry_core::validation::parse_record_id;
use registry_core::{ValidationError, ValidationErrors};
use serde_json::Value;
use tracing::warn;

use crate::error::ApiResult;
use crate::state::AppState;

pub mod extra_info;
pub mod statuses;
pub mod students;

/// Health check endpoint: pings the database.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    if state.db.health_check().await {
        (StatusCode::OK, "OK")
    } else {
        warn!("Health check failed: database unreachable");
        (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
    }
}

/// Unwraps a JSON body, turning malformed input into a validation error on `body`.
fn json_body(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<Value> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ValidationErrors::single(ValidationError::InvalidFormat {
            field: "body".to_string(),
            reason: rejection.body_text(),
        })
        .into()),
    }
}

/// Parses an `{id}` path segment.
fn path_id(raw: &str) -> ApiResult<i64> {
    parse_record_id("id", raw).map_err(|e| ValidationErrors::single(e).into())
}
