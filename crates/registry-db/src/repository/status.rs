//! # Status Repository
//!
//! The status reference table and its one-time seeding.
//!
//! ## Seeding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    seed_status_table()                                  │
//! │                                                                         │
//! │  SELECT COUNT(*) FROM student_statuses                                 │
//! │       │                                                                 │
//! │       ├── > 0  → nothing to do, no writes                              │
//! │       │                                                                 │
//! │       └── = 0  → BEGIN                                                 │
//! │                  INSERT OR IGNORE × 8 (active, academic_leave, ...)    │
//! │                  COMMIT                                                 │
//! │                                                                         │
//! │  INSERT OR IGNORE keeps two processes starting at the same time        │
//! │  from duplicating rows: UNIQUE(status_code) arbitrates.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use registry_core::{Status, StudentStatus};

/// Repository for the status reference table.
#[derive(Debug, Clone)]
pub struct StatusRepository {
    pool: SqlitePool,
}

impl StatusRepository {
    /// Creates a new StatusRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StatusRepository { pool }
    }

    /// Inserts the fixed status vocabulary if the table is empty.
    ///
    /// Call once at process start. Safe to call again (even after a
    /// restart): existing rows are detected and nothing is written.
    ///
    /// ## Returns
    /// Number of rows inserted (0 when the table was already seeded).
    pub async fn seed_status_table(&self) -> DbResult<u64> {
        let existing = self.count().await?;
        if existing > 0 {
            debug!(existing, "Status table already seeded");
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for status in StudentStatus::ALL {
            let result = sqlx::query(
                r#"
                INSERT OR IGNORE INTO student_statuses (status_code, status_label)
                VALUES (?1, ?2)
                "#,
            )
            .bind(status.code())
            .bind(status.label())
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;

        info!(inserted, "Seeded status table");
        Ok(inserted)
    }

    /// Lists every status, ordered by status_id.
    pub async fn list_all(&self) -> DbResult<Vec<Status>> {
        let statuses = sqlx::query_as::<_, Status>(
            r#"
            SELECT status_id, status_code, status_label
            FROM student_statuses
            ORDER BY status_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(statuses)
    }

    /// Gets a status by its code.
    ///
    /// ## Returns
    /// * `Ok(Some(Status))` - Status found
    /// * `Ok(None)` - No such code
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Status>> {
        let status = sqlx::query_as::<_, Status>(
            r#"
            SELECT status_id, status_code, status_label
            FROM student_statuses
            WHERE status_code = ?1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status)
    }

    /// Counts status rows.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM student_statuses")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
