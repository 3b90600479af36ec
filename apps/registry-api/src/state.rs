//! Shared application state.

use registry_db::Database;

/// State handed to every handler through axum `State`.
///
/// Holds nothing but the storage handle: no cross-request state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}
