//! Status vocabulary handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use registry_core::StatusView;

use crate::error::ApiResult;
use crate::state::AppState;

/// `GET /read_statuses/`
pub async fn read_statuses(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<StatusView>>> {
    let statuses = state.db.statuses().list_all().await?;
    Ok(Json(statuses.into_iter().map(StatusView::from).collect()))
}
