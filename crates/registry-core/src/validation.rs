//! # Validation Module
//!
//! Input validation for the student registry.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (registry-api)                                  │
//! │  ├── Body must be JSON                                                 │
//! │  └── Raw serde_json::Value handed to this module                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Types (string vs number), required fields                         │
//! │  ├── Formats (email, YYYY-MM-DD dates, status tokens)                  │
//! │  └── ALL fields checked, ALL violations returned                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE (students.email)                                           │
//! │  └── FOREIGN KEY (status_code, student_id)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Whole-record validation works on a `serde_json::Value` instead of a typed
//! struct: deserializing into a struct would stop at the first bad field.
//!
//! ## Usage
//! ```rust
//! use registry_core::validation::{validate_email, validate_date_of_birth};
//! use chrono::NaiveDate;
//!
//! assert_eq!(validate_email(" Ana@X.com ").unwrap(), "ana@x.com");
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! assert!(validate_date_of_birth("1999-01-01", today).is_ok());
//! assert!(validate_date_of_birth("01-01-1999", today).is_err());
//! ```

use chrono::{NaiveDate, Utc};
use serde_json::{Map, Value};

use crate::error::{ValidationError, ValidationErrors};
use crate::types::{NewExtraInfo, NewStudent};
use crate::{MAX_EMAIL_LEN, MAX_INFO_TYPE_LEN, MAX_INFO_VALUE_LEN, MAX_NAME_LEN, MAX_STATUS_CODE_LEN};

/// Result type for single-field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Wire format of `date_of_birth`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Whole-Record Validators
// =============================================================================

/// Validates the body of a create-student request.
///
/// Returns the normalized record, or every violation found.
pub fn validate_new_student(input: &Value) -> Result<NewStudent, ValidationErrors> {
    validate_new_student_at(input, Utc::now().date_naive())
}

/// Same as [`validate_new_student`] with an explicit "today" for the
/// date-of-birth range check.
pub fn validate_new_student_at(input: &Value, today: NaiveDate) -> Result<NewStudent, ValidationErrors> {
    let obj = as_object(input)?;
    let mut errors = ValidationErrors::new();

    let first_name = errors.check(required_str(obj, "first_name").and_then(|s| validate_name("first_name", s)));
    let last_name = errors.check(required_str(obj, "last_name").and_then(|s| validate_name("last_name", s)));
    let email = errors.check(required_str(obj, "email").and_then(validate_email));
    let date_of_birth = errors.check(
        required_str(obj, "date_of_birth").and_then(|s| validate_date_of_birth(s, today)),
    );
    let status_code = errors.check(required_str(obj, "status_code").and_then(validate_status_code));

    match (first_name, last_name, email, date_of_birth, status_code) {
        (Some(first_name), Some(last_name), Some(email), Some(date_of_birth), Some(status_code))
            if errors.is_empty() =>
        {
            Ok(NewStudent {
                first_name,
                last_name,
                date_of_birth,
                email,
                status_code,
            })
        }
        _ => Err(errors),
    }
}

/// Validates the body of a create-extra-info request.
pub fn validate_new_extra_info(input: &Value) -> Result<NewExtraInfo, ValidationErrors> {
    let obj = as_object(input)?;
    let mut errors = ValidationErrors::new();

    let student_id = errors.check(required_id(obj, "student_id"));
    let info_type = errors.check(
        required_str(obj, "info_type").and_then(|s| validate_text("info_type", s, MAX_INFO_TYPE_LEN)),
    );
    let info_value = errors.check(
        required_str(obj, "info_value").and_then(|s| validate_text("info_value", s, MAX_INFO_VALUE_LEN)),
    );

    match (student_id, info_type, info_value) {
        (Some(student_id), Some(info_type), Some(info_value)) if errors.is_empty() => Ok(NewExtraInfo {
            student_id,
            info_type,
            info_value,
        }),
        _ => Err(errors),
    }
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a first or last name.
///
/// ## Rules
/// - Must not be blank
/// - At most 100 characters after trimming
///
/// ## Returns
/// The trimmed name.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    validate_text(field, name, MAX_NAME_LEN)
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be blank, at most 254 characters
/// - Exactly one `@`, non-empty local part
/// - Domain has at least one dot and no empty labels
/// - No whitespace anywhere
///
/// ## Returns
/// The trimmed, lowercased address. Lowercasing makes the storage
/// uniqueness check case-insensitive.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(required("email"));
    }

    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LEN,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }

    let (local, domain) = match email.split_once('@') {
        Some(parts) => parts,
        None => return Err(invalid("must contain '@'")),
    };

    if local.is_empty() {
        return Err(invalid("missing the part before '@'"));
    }

    if domain.contains('@') {
        return Err(invalid("must contain exactly one '@'"));
    }

    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(invalid("domain must look like example.com"));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '.')
    {
        return Err(invalid("domain contains invalid characters"));
    }

    Ok(email.to_lowercase())
}

/// Validates a status code token.
///
/// ## Rules
/// - Must not be blank, at most 32 characters
/// - Only lowercase ASCII letters, digits and underscores
///
/// Whether the code exists is decided by the database foreign key, not here.
pub fn validate_status_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(required("status_code"));
    }

    if code.len() > MAX_STATUS_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "status_code".to_string(),
            max: MAX_STATUS_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "status_code".to_string(),
            reason: "must contain only lowercase letters, digits and underscores".to_string(),
        });
    }

    Ok(code.to_string())
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates a date of birth in `YYYY-MM-DD` form.
///
/// ## Rules
/// - Exactly `YYYY-MM-DD`: zero-padded, no sign (`1999-1-1` is rejected)
/// - Must parse as a real calendar date (`1999-02-30` is rejected)
/// - Must not be after `today`
pub fn validate_date_of_birth(raw: &str, today: NaiveDate) -> ValidationResult<NaiveDate> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(required("date_of_birth"));
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "date_of_birth".to_string(),
        reason: "expected a calendar date as YYYY-MM-DD".to_string(),
    };

    // chrono accepts unpadded fields and a leading sign; the wire format does not
    if !is_iso_date_shape(raw) {
        return Err(invalid());
    }

    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())?;

    if date > today {
        return Err(ValidationError::OutOfRange {
            field: "date_of_birth".to_string(),
            reason: "must not be in the future".to_string(),
        });
    }

    Ok(date)
}

fn is_iso_date_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Parses a record id taken from a URL path segment.
///
/// ## Example
/// ```rust
/// use registry_core::validation::parse_record_id;
///
/// assert_eq!(parse_record_id("id", "42").unwrap(), 42);
/// assert!(parse_record_id("id", "abc").is_err());
/// ```
pub fn parse_record_id(field: &str, raw: &str) -> ValidationResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| ValidationError::TypeMismatch {
        field: field.to_string(),
        expected: "integer",
        found: "string",
    })
}

// =============================================================================
// JSON Helpers
// =============================================================================

fn as_object(input: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    input.as_object().ok_or_else(|| {
        ValidationErrors::single(ValidationError::TypeMismatch {
            field: "body".to_string(),
            expected: "object",
            found: json_type_name(input),
        })
    })
}

fn required_str<'a>(obj: &'a Map<String, Value>, field: &str) -> ValidationResult<&'a str> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(required(field)),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(ValidationError::TypeMismatch {
            field: field.to_string(),
            expected: "string",
            found: json_type_name(other),
        }),
    }
}

fn required_id(obj: &Map<String, Value>, field: &str) -> ValidationResult<i64> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(required(field)),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(id) if id > 0 => Ok(id),
            Some(_) => Err(ValidationError::OutOfRange {
                field: field.to_string(),
                reason: "must be a positive integer".to_string(),
            }),
            None => Err(ValidationError::TypeMismatch {
                field: field.to_string(),
                expected: "integer",
                found: "number",
            }),
        },
        Some(other) => Err(ValidationError::TypeMismatch {
            field: field.to_string(),
            expected: "integer",
            found: json_type_name(other),
        }),
    }
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn valid_input() -> Value {
        json!({
            "first_name": "Ana",
            "last_name": "Lee",
            "email": "ana@x.com",
            "date_of_birth": "1999-01-01",
            "status_code": "active",
        })
    }

    #[test]
    fn test_valid_student_is_normalized() {
        let mut input = valid_input();
        input["first_name"] = json!("  Ana ");
        input["email"] = json!("Ana@X.com");

        let student = validate_new_student_at(&input, today()).unwrap();

        assert_eq!(student.first_name, "Ana");
        assert_eq!(student.last_name, "Lee");
        assert_eq!(student.email, "ana@x.com");
        assert_eq!(student.date_of_birth, NaiveDate::from_ymd_opt(1999, 1, 1).unwrap());
        assert_eq!(student.status_code, "active");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut input = valid_input();
        input["nickname"] = json!("annie");
        assert!(validate_new_student_at(&input, today()).is_ok());
    }

    #[test]
    fn test_every_violation_is_reported() {
        let input = json!({
            "first_name": 42,
            "last_name": "",
            "email": "not-an-email",
            "date_of_birth": "1999-13-01",
        });

        let errors = validate_new_student_at(&input, today()).unwrap_err();

        assert_eq!(
            errors.fields(),
            vec!["first_name", "last_name", "email", "date_of_birth", "status_code"]
        );
        let kinds: Vec<&str> = errors.iter().map(ValidationError::kind).collect();
        assert_eq!(
            kinds,
            vec!["type_mismatch", "missing", "invalid_format", "invalid_format", "missing"]
        );
    }

    #[test]
    fn test_non_object_body() {
        let errors = validate_new_student_at(&json!([1, 2]), today()).unwrap_err();
        assert_eq!(errors.fields(), vec!["body"]);
    }

    #[test]
    fn test_null_counts_as_missing() {
        let mut input = valid_input();
        input["email"] = Value::Null;

        let errors = validate_new_student_at(&input, today()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.iter().next().unwrap().kind(), "missing");
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email("ana@x.com").unwrap(), "ana@x.com");
        assert_eq!(validate_email("first.last+tag@uni.edu.ru").unwrap(), "first.last+tag@uni.edu.ru");

        assert!(validate_email("").is_err());
        assert!(validate_email("ana").is_err());
        assert!(validate_email("@x.com").is_err());
        assert!(validate_email("ana@x").is_err());
        assert!(validate_email("ana@x..com").is_err());
        assert!(validate_email("ana@@x.com").is_err());
        assert!(validate_email("a na@x.com").is_err());
        assert!(validate_email("ana@x_y.com").is_err());
        assert!(validate_email(&format!("{}@x.com", "a".repeat(300))).is_err());
    }

    #[test]
    fn test_validate_date_of_birth() {
        assert!(validate_date_of_birth("1980-11-26", today()).is_ok());
        assert!(validate_date_of_birth("2025-06-01", today()).is_ok());

        assert!(matches!(
            validate_date_of_birth("26-11-1980", today()),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(validate_date_of_birth("1999-02-30", today()).is_err());
        for lenient in ["1999-1-1", "1999-01-1", "+1999-01-01", "1999-01-01T00:00"] {
            assert!(
                matches!(
                    validate_date_of_birth(lenient, today()),
                    Err(ValidationError::InvalidFormat { .. })
                ),
                "{lenient}"
            );
        }
        assert!(matches!(
            validate_date_of_birth("2025-06-02", today()),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_status_code() {
        assert_eq!(validate_status_code("academic_leave").unwrap(), "academic_leave");
        assert!(validate_status_code("").is_err());
        assert!(validate_status_code("Active").is_err());
        assert!(validate_status_code("on-leave").is_err());
        assert!(validate_status_code(&"a".repeat(33)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("first_name", " Ана ").unwrap(), "Ана");
        assert!(validate_name("first_name", "   ").is_err());
        assert!(validate_name("first_name", &"я".repeat(100)).is_ok());
        assert!(validate_name("first_name", &"я".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_new_extra_info() {
        let info = validate_new_extra_info(&json!({
            "student_id": 3,
            "info_type": "address",
            "info_value": " Main st. 1 ",
        }))
        .unwrap();
        assert_eq!(info.student_id, 3);
        assert_eq!(info.info_value, "Main st. 1");

        let errors = validate_new_extra_info(&json!({
            "student_id": "3",
            "info_type": "",
        }))
        .unwrap_err();
        assert_eq!(errors.fields(), vec!["student_id", "info_type", "info_value"]);

        let errors = validate_new_extra_info(&json!({
            "student_id": -1,
            "info_type": "note",
            "info_value": "x",
        }))
        .unwrap_err();
        assert_eq!(errors.iter().next().unwrap().kind(), "out_of_range");
    }

    #[test]
    fn test_parse_record_id() {
        assert_eq!(parse_record_id("id", "1").unwrap(), 1);
        assert_eq!(parse_record_id("id", "-5").unwrap(), -5);
        assert!(parse_record_id("id", "1.5").is_err());
        assert!(parse_record_id("id", "").is_err());
    }
}
