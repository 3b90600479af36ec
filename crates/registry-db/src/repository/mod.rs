//! # Repository Module
//!
//! Database repository implementations for the student registry.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  axum handler                                                          │
//! │       │                                                                 │
//! │       │  db.students().create(&new_student)                            │
//! │       ▼                                                                 │
//! │  StudentRepository                                                     │
//! │  ├── create(&self, record)      → Student | ConstraintViolation        │
//! │  ├── get_by_id(&self, id)       → Option<Student>                      │
//! │  ├── get_full(&self, id)        → Option<StudentFullView>              │
//! │  ├── list_all(&self)            → Vec<Student> (id ascending)          │
//! │  └── delete(&self, id)          → bool (deleted or not)                │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`StudentRepository`] - Student create/read/delete
//! - [`StatusRepository`] - Status vocabulary and seeding
//! - [`ExtraInfoRepository`] - Free-form attributes owned by a student
//!
//! [`StudentRepository`]: student::StudentRepository
//! [`StatusRepository`]: status::StatusRepository
//! [`ExtraInfoRepository`]: extra_info::ExtraInfoRepository

pub mod extra_info;
pub mod status;
pub mod student;
