//! # Student Registry API
//!
//! HTTP server for creating, listing, reading and deleting students.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Registry API Server                              │
//! │                                                                         │
//! │  Client ───► HTTP (8000) ───► TraceLayer ───► Router                   │
//! │                                                 │                       │
//! │                                                 ▼                       │
//! │                        validate (registry-core) │                       │
//! │                                                 ▼                       │
//! │                        persist  (registry-db) ───► SQLite              │
//! │                                                 │                       │
//! │                                                 ▼                       │
//! │                        ApiError ───► 422 / 409 / 404 / 5xx             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (optionally from `.env`):
//! - `REGISTRY_BIND_ADDR` - Listen address (default `0.0.0.0`)
//! - `REGISTRY_PORT` - Listen port (default `8000`)
//! - `DATABASE_PATH` - SQLite file (default `./registry.db`)
//! - `DATABASE_MAX_CONNECTIONS` - Pool size (default `5`)
//! - `RUST_LOG` / `REGISTRY_LOG_LEVEL` - Log filter (default `info`)

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/create_user/", post(routes::students::create_user))
        .route("/read_users/", get(routes::students::read_users))
        .route("/read_user/{id}", get(routes::students::read_user))
        .route("/read_user_full/{id}", get(routes::students::read_user_full))
        .route("/user_delete/{id}", delete(routes::students::delete_user))
        .route("/create_extra_info/", post(routes::extra_info::create_extra_info))
        .route("/read_statuses/", get(routes::statuses::read_statuses))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
