//! # Error Types
//!
//! Domain-specific error types for registry-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  registry-core errors (this file)                                      │
//! │  ├── ValidationError   - One offending field                           │
//! │  ├── ValidationErrors  - Every offending field of one record           │
//! │  └── CoreError         - General domain errors                         │
//! │                                                                         │
//! │  registry-db errors (separate crate)                                   │
//! │  └── DbError           - Storage failures and constraint violations    │
//! │                                                                         │
//! │  registry-api errors (in app)                                          │
//! │  └── ApiError          - What HTTP clients see                         │
//! │                                                                         │
//! │  Flow: ValidationErrors ──┐                                            │
//! │        DbError ───────────┴─► ApiError ─► JSON response                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// A single input validation failure, always tied to one field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing, null or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// The JSON value has the wrong type (e.g. a number where text is expected).
    #[error("{field} must be a {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. malformed email, malformed date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is syntactically fine but outside the accepted range.
    #[error("{field} is out of range: {reason}")]
    OutOfRange { field: String, reason: String },
}

impl ValidationError {
    /// The name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TypeMismatch { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::OutOfRange { field, .. } => field,
        }
    }

    /// Machine-readable violation kind, stable across releases.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::Required { .. } => "missing",
            ValidationError::TypeMismatch { .. } => "type_mismatch",
            ValidationError::TooLong { .. } => "too_long",
            ValidationError::InvalidFormat { .. } => "invalid_format",
            ValidationError::OutOfRange { .. } => "out_of_range",
        }
    }
}

// =============================================================================
// Validation Errors (collection)
// =============================================================================

/// Every validation failure found in one record.
///
/// Validation never stops at the first bad field: callers get the complete
/// list so a client can fix all of them in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        ValidationErrors::default()
    }

    /// Wraps a single failure.
    pub fn single(error: ValidationError) -> Self {
        ValidationErrors {
            errors: vec![error],
        }
    }

    /// Records a failure.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Keeps the value of a successful check, records the failure otherwise.
    pub fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Names of the offending fields, in the order they were checked.
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(ValidationError::field).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "validation failed: {}", messages.join("; "))
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        ValidationErrors::single(error)
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A status code outside the fixed vocabulary.
    #[error("Unknown status code: {0}")]
    UnknownStatus(String),

    /// Validation error (wraps ValidationErrors).
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::TypeMismatch {
            field: "first_name".to_string(),
            expected: "string",
            found: "number",
        };
        assert_eq!(err.to_string(), "first_name must be a string, got number");
    }

    #[test]
    fn test_field_and_kind() {
        let err = ValidationError::InvalidFormat {
            field: "date_of_birth".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        };
        assert_eq!(err.field(), "date_of_birth");
        assert_eq!(err.kind(), "invalid_format");
    }

    #[test]
    fn test_check_collects_failures() {
        let mut errors = ValidationErrors::new();

        let kept = errors.check::<i32>(Ok(7));
        let dropped = errors.check::<i32>(Err(ValidationError::Required {
            field: "last_name".to_string(),
        }));

        assert_eq!(kept, Some(7));
        assert_eq!(dropped, None);
        assert_eq!(errors.fields(), vec!["last_name"]);
    }

    #[test]
    fn test_display_joins_all_messages() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::Required {
            field: "email".to_string(),
        });
        errors.push(ValidationError::TooLong {
            field: "last_name".to_string(),
            max: 100,
        });

        assert_eq!(
            errors.to_string(),
            "validation failed: email is required; last_name must be at most 100 characters"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let errors = ValidationErrors::single(ValidationError::Required {
            field: "email".to_string(),
        });
        let core_err: CoreError = errors.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
