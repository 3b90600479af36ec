//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Categorized: constraint vs. fault             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (registry-api) ← 409 / 500 / 503 + correlation id            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Client sees a stable message, never raw SQLite text                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Database operation errors.
///
/// `ConstraintViolation` is an expected business outcome. Everything else
/// is a fault the caller should log.
#[derive(Debug, Error)]
pub enum DbError {
    /// A storage-enforced rule failed at write time.
    ///
    /// ## When This Occurs
    /// - Inserting a duplicate email (`field = "email"`)
    /// - Referencing a status that does not exist (`field = "status_code"`)
    /// - Attaching extra info to a missing student (`field = "student_id"`)
    #[error("Constraint violated on {field}")]
    ConstraintViolation { field: String },

    /// Foreign key constraint violation whose column is not known yet.
    ///
    /// SQLite does not name the column in FK errors, so repositories rewrite
    /// this into `ConstraintViolation` with [`DbError::on_foreign_key`].
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// The database cannot be reached (pool closed, timed out, I/O failure).
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a ConstraintViolation error.
    pub fn constraint(field: impl Into<String>) -> Self {
        DbError::ConstraintViolation {
            field: field.into(),
        }
    }

    /// Names the column of a foreign key failure.
    ///
    /// Used by statements that carry exactly one foreign key, so the column
    /// is unambiguous. Other errors pass through unchanged.
    pub fn on_foreign_key(self, field: &str) -> Self {
        match self {
            DbError::ForeignKeyViolation { .. } => DbError::constraint(field),
            other => other,
        }
    }

    /// True for failures that are a system fault rather than a business outcome.
    pub fn is_fault(&self) -> bool {
        !matches!(
            self,
            DbError::ConstraintViolation { .. } | DbError::ForeignKeyViolation { .. }
        )
    }
}

/// Extracts the column from `UNIQUE constraint failed: <table>.<column>`.
///
/// Composite keys report `t.a, t.b`; the first column is used.
fn unique_column(message: &str) -> Option<String> {
    let columns = message.split("UNIQUE constraint failed: ").nth(1)?;
    let first = columns.split(',').next()?.trim();
    let column = first.rsplit('.').next()?;
    (!column.is_empty()).then(|| column.to_string())
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound          → DbError::QueryFailed
/// Database, UniqueViolation         → DbError::ConstraintViolation { field: <column> }
/// Database, ForeignKeyViolation     → DbError::ForeignKeyViolation
/// Database, other                   → DbError::QueryFailed
/// PoolTimedOut / PoolClosed / Io    → DbError::Unavailable
/// Other                             → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            // Lookups use fetch_optional; a missing row here means a
            // statement that must return one (INSERT ... RETURNING) did not.
            sqlx::Error::RowNotFound => DbError::QueryFailed("Expected a row, got none".to_string()),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite messages:
                // UNIQUE constraint: "UNIQUE constraint failed: <table>.<column>"
                // FK constraint: "FOREIGN KEY constraint failed"
                let kind = db_err.kind();
                if matches!(kind, ErrorKind::UniqueViolation) || msg.contains("UNIQUE constraint failed") {
                    DbError::ConstraintViolation {
                        field: unique_column(msg).unwrap_or_else(|| "unknown".to_string()),
                    }
                } else if matches!(kind, ErrorKind::ForeignKeyViolation)
                    || msg.contains("FOREIGN KEY constraint failed")
                {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::Unavailable("Connection pool timed out".to_string()),

            sqlx::Error::PoolClosed => DbError::Unavailable("Pool is closed".to_string()),

            sqlx::Error::Io(e) => DbError::Unavailable(e.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================
