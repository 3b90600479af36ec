//! Student handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use registry_core::validation::validate_new_student;
use registry_core::{StudentFullView, StudentView};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{json_body, path_id};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// `POST /create_user/`
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<StudentView>)> {
    let body = json_body(payload)?;
    let new_student = validate_new_student(&body)?;

    let student = state.db.students().create(&new_student).await?;

    info!(id = student.id, "Student created");
    Ok((StatusCode::CREATED, Json(student.to_view())))
}

/// `GET /read_users/`
pub async fn read_users(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<StudentView>>> {
    let students = state.db.students().list_all().await?;
    Ok(Json(students.into_iter().map(StudentView::from).collect()))
}

/// `GET /read_user/{id}`
pub async fn read_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<StudentView>> {
    let id = path_id(&id)?;

    match state.db.students().get_by_id(id).await? {
        Some(student) => Ok(Json(student.to_view())),
        None => {
            debug!(id, "Student not found");
            Err(ApiError::NotFound)
        }
    }
}

/// `GET /read_user_full/{id}`: student with its status and extra info.
pub async fn read_user_full(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<StudentFullView>> {
    let id = path_id(&id)?;

    state
        .db
        .students()
        .get_full(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `DELETE /user_delete/{id}`
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    let id = path_id(&id)?;

    if !state.db.students().delete(id).await? {
        debug!(id, "Nothing to delete");
        return Err(ApiError::NotFound);
    }

    info!(id, "Student deleted");
    Ok(Json(MessageBody {
        message: "User deleted",
    }))
}
