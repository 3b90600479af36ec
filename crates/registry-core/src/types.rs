//! # Domain Types
//!
//! Records of the student registry in their three shapes.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │   write shape          stored record          read view                 │
//! │   ───────────          ─────────────          ─────────                 │
//! │   NewStudent    ──►    Student         ──►    StudentView               │
//! │   NewExtraInfo  ──►    ExtraInfo       ──►    ExtraInfoView             │
//! │                        Status          ──►    StatusView                │
//! │                                                                         │
//! │   Student + Status + [ExtraInfo]       ──►    StudentFullView           │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Student      │   │     Status      │   │   ExtraInfo     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  status_id      │   │  id (i64)       │       │
//! │  │  email (unique) │   │  status_code ◄──┼───│  student_id(FK) │       │
//! │  │  status_code(FK)┼──►│  status_label   │   │  info_type      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Relationships are plain foreign-key fields. Nothing here holds a pointer
//! to another record; joins happen at query time in registry-db.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// =============================================================================
// Status Vocabulary
// =============================================================================

/// The fixed vocabulary of student statuses seeded at first startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    Active,
    AcademicLeave,
    Expelled,
    Reinstated,
    Graduated,
    Transferred,
    Postgraduate,
    Debt,
}

impl StudentStatus {
    /// Every status, in seeding order.
    pub const ALL: [StudentStatus; 8] = [
        StudentStatus::Active,
        StudentStatus::AcademicLeave,
        StudentStatus::Expelled,
        StudentStatus::Reinstated,
        StudentStatus::Graduated,
        StudentStatus::Transferred,
        StudentStatus::Postgraduate,
        StudentStatus::Debt,
    ];

    /// Machine token stored in `student_statuses.status_code`.
    pub const fn code(&self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::AcademicLeave => "academic_leave",
            StudentStatus::Expelled => "expelled",
            StudentStatus::Reinstated => "reinstated",
            StudentStatus::Graduated => "graduated",
            StudentStatus::Transferred => "transferred",
            StudentStatus::Postgraduate => "postgraduate",
            StudentStatus::Debt => "debt",
        }
    }

    /// Human-readable label stored in `student_statuses.status_label`.
    pub const fn label(&self) -> &'static str {
        match self {
            StudentStatus::Active => "Обучается",
            StudentStatus::AcademicLeave => "Академический отпуск",
            StudentStatus::Expelled => "Отчислен",
            StudentStatus::Reinstated => "Восстановлен",
            StudentStatus::Graduated => "Завершил обучение",
            StudentStatus::Transferred => "Переведён",
            StudentStatus::Postgraduate => "Продолжает обучение",
            StudentStatus::Debt => "Академическая задолженность",
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for StudentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StudentStatus::ALL
            .into_iter()
            .find(|status| status.code() == s)
            .ok_or_else(|| CoreError::UnknownStatus(s.to_string()))
    }
}

// =============================================================================
// Student
// =============================================================================

/// A student row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Student {
    /// Surrogate key, assigned by storage.
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    /// Unique across all students (stored lowercased).
    pub email: String,
    /// References `student_statuses.status_code`.
    pub status_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a student.
///
/// Produced only by [`crate::validation::validate_new_student`], so every
/// field is already trimmed and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub status_code: String,
}

/// What API callers see for a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub status_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Projects the row into its read view.
    pub fn to_view(&self) -> StudentView {
        StudentView::from(self)
    }
}

impl From<&Student> for StudentView {
    fn from(student: &Student) -> Self {
        StudentView {
            id: student.id,
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            email: student.email.clone(),
            date_of_birth: student.date_of_birth,
            status_code: student.status_code.clone(),
            created_at: student.created_at,
            updated_at: student.updated_at,
        }
    }
}

impl From<Student> for StudentView {
    fn from(student: Student) -> Self {
        StudentView {
            id: student.id,
            first_name: student.first_name,
            last_name: student.last_name,
            email: student.email,
            date_of_birth: student.date_of_birth,
            status_code: student.status_code,
            created_at: student.created_at,
            updated_at: student.updated_at,
        }
    }
}

// =============================================================================
// Status
// =============================================================================

/// A row of the status reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Status {
    pub status_id: i64,
    pub status_code: String,
    pub status_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusView {
    pub status_id: i64,
    pub status_code: String,
    pub status_label: String,
}

impl From<&Status> for StatusView {
    fn from(status: &Status) -> Self {
        StatusView {
            status_id: status.status_id,
            status_code: status.status_code.clone(),
            status_label: status.status_label.clone(),
        }
    }
}

impl From<Status> for StatusView {
    fn from(status: Status) -> Self {
        StatusView {
            status_id: status.status_id,
            status_code: status.status_code,
            status_label: status.status_label,
        }
    }
}

// =============================================================================
// Extra Info
// =============================================================================

/// A free-form attribute attached to a student (address, complaint note, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ExtraInfo {
    pub id: i64,
    /// Owning student; rows are removed together with their student.
    pub student_id: i64,
    pub info_type: String,
    pub info_value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for attaching extra info to a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExtraInfo {
    pub student_id: i64,
    pub info_type: String,
    pub info_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraInfoView {
    pub id: i64,
    pub student_id: i64,
    pub info_type: String,
    pub info_value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ExtraInfo> for ExtraInfoView {
    fn from(info: &ExtraInfo) -> Self {
        ExtraInfoView {
            id: info.id,
            student_id: info.student_id,
            info_type: info.info_type.clone(),
            info_value: info.info_value.clone(),
            created_at: info.created_at,
            updated_at: info.updated_at,
        }
    }
}

impl From<ExtraInfo> for ExtraInfoView {
    fn from(info: ExtraInfo) -> Self {
        ExtraInfoView {
            id: info.id,
            student_id: info.student_id,
            info_type: info.info_type,
            info_value: info.info_value,
            created_at: info.created_at,
            updated_at: info.updated_at,
        }
    }
}

// =============================================================================
// Full Student View
// =============================================================================

/// A student together with its status and every extra info row.
///
/// ## JSON Shape
/// ```json
/// {
///   "id": 1, "first_name": "Ana", ..., "status_code": "active",
///   "status": { "status_id": 1, "status_code": "active", "status_label": "..." },
///   "extra_info": [ { "id": 3, "info_type": "address", ... } ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFullView {
    #[serde(flatten)]
    pub student: StudentView,
    pub status: StatusView,
    pub extra_info: Vec<ExtraInfoView>,
}

impl StudentFullView {
    /// Builds the full view from rows fetched separately.
    ///
    /// Extra info rows that belong to another student are skipped, so the
    /// caller can pass an unfiltered slice without leaking foreign rows.
    pub fn assemble(student: &Student, status: &Status, extra_info: &[ExtraInfo]) -> Self {
        StudentFullView {
            student: student.to_view(),
            status: StatusView::from(status),
            extra_info: extra_info
                .iter()
                .filter(|info| info.student_id == student.id)
                .map(ExtraInfoView::from)
                .collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_student() -> Student {
        let at = Utc.with_ymd_and_hms(2024, 9, 1, 8, 30, 0).unwrap();
        Student {
            id: 1,
            first_name: "Ana".to_string(),
            last_name: "Lee".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1999, 1, 1).unwrap(),
            email: "ana@x.com".to_string(),
            status_code: "active".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_status_vocabulary_is_unique() {
        let mut codes: Vec<&str> = StudentStatus::ALL.iter().map(|s| s.code()).collect();
        let mut labels: Vec<&str> = StudentStatus::ALL.iter().map(|s| s.label()).collect();
        codes.sort_unstable();
        codes.dedup();
        labels.sort_unstable();
        labels.dedup();

        assert_eq!(codes.len(), StudentStatus::ALL.len());
        assert_eq!(labels.len(), StudentStatus::ALL.len());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            "academic_leave".parse::<StudentStatus>().unwrap(),
            StudentStatus::AcademicLeave
        );
        assert!(matches!(
            "on_vacation".parse::<StudentStatus>(),
            Err(CoreError::UnknownStatus(code)) if code == "on_vacation"
        ));
    }

    #[test]
    fn test_status_serde_matches_code() {
        for status in StudentStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.code()));
        }
    }

    #[test]
    fn test_student_view_json_shape() {
        let view = sample_student().to_view();
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["email"], "ana@x.com");
        assert_eq!(json["date_of_birth"], "1999-01-01");
        assert_eq!(json["created_at"], "2024-09-01T08:30:00Z");
    }

    #[test]
    fn test_full_view_filters_foreign_rows() {
        let student = sample_student();
        let status = Status {
            status_id: 1,
            status_code: "active".to_string(),
            status_label: StudentStatus::Active.label().to_string(),
        };
        let own = ExtraInfo {
            id: 10,
            student_id: 1,
            info_type: "address".to_string(),
            info_value: "Main st. 1".to_string(),
            created_at: student.created_at,
            updated_at: student.created_at,
        };
        let foreign = ExtraInfo {
            id: 11,
            student_id: 2,
            ..own.clone()
        };

        let full = StudentFullView::assemble(&student, &status, &[own, foreign]);

        assert_eq!(full.extra_info.len(), 1);
        assert_eq!(full.extra_info[0].id, 10);

        let json = serde_json::to_value(&full).unwrap();
        assert_eq!(json["first_name"], "Ana");
        assert_eq!(json["status"]["status_code"], "active");
    }
}
