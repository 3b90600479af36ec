//! # registry-core: Pure Domain Logic for the Student Registry
//!
//! This crate holds the record shapes and the validation rules of the
//! registry. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Student Registry Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 registry-api (axum handlers)                    │   │
//! │  │   POST /create_user/ ─ GET /read_users/ ─ DELETE /user_delete/  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ registry-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌────────────┐                │   │
//! │  │   │   types   │  │ validation │  │   error    │                │   │
//! │  │   │  Student  │  │ write shape│  │ Validation │                │   │
//! │  │   │  Status   │  │   checks   │  │   Errors   │                │   │
//! │  │   │ ExtraInfo │  └────────────┘  └────────────┘                │   │
//! │  │   └───────────┘                                                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  registry-db (Database Layer)                   │   │
//! │  │        SQLite queries, migrations, constraint mapping           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Stored records, write shapes and read views
//! - [`error`] - Validation and domain error types
//! - [`validation`] - Field rules and whole-record validation
//!
//! ## Example Usage
//!
//! ```rust
//! use registry_core::validation::validate_new_student;
//! use serde_json::json;
//!
//! let input = json!({
//!     "first_name": "Ana",
//!     "last_name": "Lee",
//!     "email": "ana@x.com",
//!     "date_of_birth": "1999-01-01",
//!     "status_code": "active",
//! });
//!
//! let student = validate_new_student(&input).unwrap();
//! assert_eq!(student.email, "ana@x.com");
//!
//! // Every offending field is reported, not just the first one
//! let errors = validate_new_student(&json!({ "email": "nope" })).unwrap_err();
//! assert_eq!(errors.len(), 5);
//! ```

pub mod error;
pub mod types;
pub mod validation;

pub use error::{CoreError, ValidationError, ValidationErrors};
pub use types::*;

/// Maximum length of a first or last name.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of an email address (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

/// Maximum length of a status code token.
pub const MAX_STATUS_CODE_LEN: usize = 32;

/// Maximum length of an extra info category label.
pub const MAX_INFO_TYPE_LEN: usize = 50;

/// Maximum length of an extra info value.
pub const MAX_INFO_VALUE_LEN: usize = 2000;
