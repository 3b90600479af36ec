//! # Student Repository
//!
//! Database operations for students.
//!
//! ## Create Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create(&NewStudent)                                  │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    INSERT INTO students (...) RETURNING *                              │
//! │       │                                                                 │
//! │       ├── UNIQUE(email) fails   → ConstraintViolation { "email" }      │
//! │       ├── FK(status_code) fails → ConstraintViolation { "status_code" }│
//! │       └── OK                                                            │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  On any error the transaction is dropped and rolled back:              │
//! │  no partial row is ever visible.                                        │
//! │                                                                         │
//! │  Two concurrent creates with the same email: SQLite serializes the     │
//! │  writers, the UNIQUE index lets exactly one through.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use registry_core::{ExtraInfo, NewStudent, Status, Student, StudentFullView};

/// A student joined with its status row.
#[derive(Debug, sqlx::FromRow)]
struct StudentStatusRow {
    id: i64,
    first_name: String,
    last_name: String,
    date_of_birth: NaiveDate,
    email: String,
    status_code: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    status_id: i64,
    status_label: String,
}

impl StudentStatusRow {
    fn split(self) -> (Student, Status) {
        let status = Status {
            status_id: self.status_id,
            status_code: self.status_code.clone(),
            status_label: self.status_label,
        };
        let student = Student {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            email: self.email,
            status_code: self.status_code,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        (student, status)
    }
}

/// Repository for student database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.students();
///
/// let student = repo.create(&new_student).await?;
/// let same = repo.get_by_id(student.id).await?;
/// let deleted = repo.delete(student.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StudentRepository {
    pool: SqlitePool,
}

impl StudentRepository {
    /// Creates a new StudentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StudentRepository { pool }
    }

    /// Inserts a new student, assigning its id and timestamps.
    ///
    /// ## Returns
    /// * `Ok(Student)` - The stored row
    /// * `Err(DbError::ConstraintViolation { field: "email" })` - Email taken
    /// * `Err(DbError::ConstraintViolation { field: "status_code" })` - Unknown status
    pub async fn create(&self, student: &NewStudent) -> DbResult<Student> {
        debug!(email = %student.email, status_code = %student.status_code, "Creating student");

        // Same resolution as the updated_at triggers
        let now = Utc::now().trunc_subsecs(3);
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (
                first_name, last_name, date_of_birth, email, status_code,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            RETURNING
                id, first_name, last_name, date_of_birth, email, status_code,
                created_at, updated_at
            "#,
        )
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(student.date_of_birth)
        .bind(&student.email)
        .bind(&student.status_code)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DbError::from(e).on_foreign_key("status_code"))?;

        tx.commit().await?;

        debug!(id = created.id, "Student created");
        Ok(created)
    }

    /// Gets a student by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Student))` - Student found
    /// * `Ok(None)` - No student with this id
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            SELECT
                id, first_name, last_name, date_of_birth, email, status_code,
                created_at, updated_at
            FROM students
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    /// Gets a student with its status and extra info in one consistent read.
    ///
    /// The status is joined at query time; extra info rows are loaded in the
    /// same transaction, ordered by id.
    pub async fn get_full(&self, id: i64) -> DbResult<Option<StudentFullView>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, StudentStatusRow>(
            r#"
            SELECT
                s.id, s.first_name, s.last_name, s.date_of_birth, s.email, s.status_code,
                s.created_at, s.updated_at,
                st.status_id, st.status_label
            FROM students s
            INNER JOIN student_statuses st ON st.status_code = s.status_code
            WHERE s.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let extra_info = sqlx::query_as::<_, ExtraInfo>(
            r#"
            SELECT id, student_id, info_type, info_value, created_at, updated_at
            FROM student_extra_info
            WHERE student_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let (student, status) = row.split();
        Ok(Some(StudentFullView::assemble(&student, &status, &extra_info)))
    }

    /// Lists every student, id ascending.
    pub async fn list_all(&self) -> DbResult<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT
                id, first_name, last_name, date_of_birth, email, status_code,
                created_at, updated_at
            FROM students
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = students.len(), "Listed students");
        Ok(students)
    }

    /// Hard-deletes a student. Its extra info rows go with it (ON DELETE CASCADE).
    ///
    /// ## Returns
    /// * `Ok(true)` - A row was deleted
    /// * `Ok(false)` - Nothing to delete
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        debug!(id, "Deleting student");

        let result = sqlx::query("DELETE FROM students WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts students (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
