//! # Extra Info Repository
//!
//! Free-form attributes owned by a student. Rows live and die with their
//! student: the foreign key cascades on delete.

use chrono::{SubsecRound, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use registry_core::{ExtraInfo, NewExtraInfo};

/// Repository for student extra info.
#[derive(Debug, Clone)]
pub struct ExtraInfoRepository {
    pool: SqlitePool,
}

impl ExtraInfoRepository {
    /// Creates a new ExtraInfoRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExtraInfoRepository { pool }
    }

    /// Attaches an attribute to an existing student.
    ///
    /// ## Returns
    /// * `Ok(ExtraInfo)` - The stored row
    /// * `Err(DbError::ConstraintViolation { field: "student_id" })` - No such student
    pub async fn create(&self, info: &NewExtraInfo) -> DbResult<ExtraInfo> {
        debug!(student_id = info.student_id, info_type = %info.info_type, "Creating extra info");

        // Same resolution as the updated_at triggers
        let now = Utc::now().trunc_subsecs(3);

        let created = sqlx::query_as::<_, ExtraInfo>(
            r#"
            INSERT INTO student_extra_info (
                student_id, info_type, info_value, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?4)
            RETURNING id, student_id, info_type, info_value, created_at, updated_at
            "#,
        )
        .bind(info.student_id)
        .bind(&info.info_type)
        .bind(&info.info_value)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from(e).on_foreign_key("student_id"))?;

        Ok(created)
    }

    /// Lists a student's extra info, oldest first.
    pub async fn list_for_student(&self, student_id: i64) -> DbResult<Vec<ExtraInfo>> {
        let rows = sqlx::query_as::<_, ExtraInfo>(
            r#"
            SELECT id, student_id, info_type, info_value, created_at, updated_at
            FROM student_extra_info
            WHERE student_id = ?1
            ORDER BY id
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use registry_core::{NewExtraInfo, NewStudent};

    use crate::{Database, DbConfig, DbError};

    async fn db_with_student() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.statuses().seed_status_table().await.unwrap();
        let student = db
            .students()
            .create(&NewStudent {
                first_name: "Ana".to_string(),
                last_name: "Lee".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1999, 1, 1).unwrap(),
                email: "ana@x.com".to_string(),
                status_code: "active".to_string(),
            })
            .await
            .unwrap();
        (db, student.id)
    }

    fn info(student_id: i64, info_type: &str) -> NewExtraInfo {
        NewExtraInfo {
            student_id,
            info_type: info_type.to_string(),
            info_value: "value".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (db, student_id) = db_with_student().await;
        let repo = db.extra_info();

        let first = repo.create(&info(student_id, "address")).await.unwrap();
        let second = repo.create(&info(student_id, "phone")).await.unwrap();
        assert!(second.id > first.id);

        let rows = repo.list_for_student(student_id).await.unwrap();
        assert_eq!(rows, vec![first, second]);
        assert!(repo.list_for_student(student_id + 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_updated_at_after_created_at() {
        let (db, student_id) = db_with_student().await;
        let created = db.extra_info().create(&info(student_id, "address")).await.unwrap();

        sqlx::query("UPDATE student_extra_info SET info_value = 'moved' WHERE id = ?1")
            .bind(created.id)
            .execute(db.pool())
            .await
            .unwrap();

        let rows = db.extra_info().list_for_student(student_id).await.unwrap();
        assert_eq!(rows[0].info_value, "moved");
        assert_eq!(rows[0].created_at, created.created_at);
        assert!(rows[0].updated_at >= rows[0].created_at);
    }

    #[tokio::test]
    async fn test_unknown_student_is_constraint_violation() {
        let (db, student_id) = db_with_student().await;

        let err = db
            .extra_info()
            .create(&info(student_id + 100, "address"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ConstraintViolation { ref field } if field == "student_id"));
    }
}
