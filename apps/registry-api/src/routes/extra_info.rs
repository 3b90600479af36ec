//! Extra info handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use registry_core::validation::validate_new_extra_info;
use registry_core::ExtraInfoView;
use serde_json::Value;
use tracing::info;

use super::json_body;
use crate::error::ApiResult;
use crate::state::AppState;

/// `POST /create_extra_info/`
///
/// A missing student is a 409 on `student_id`, not a 404: the path names
/// no resource, the body references one.
pub async fn create_extra_info(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ExtraInfoView>)> {
    let body = json_body(payload)?;
    let new_info = validate_new_extra_info(&body)?;

    let info = state.db.extra_info().create(&new_info).await?;

    info!(id = info.id, student_id = info.student_id, "Extra info created");
    Ok((StatusCode::CREATED, Json(ExtraInfoView::from(info))))
}
