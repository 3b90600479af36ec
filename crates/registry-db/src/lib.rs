//! # registry-db: Database Layer for the Student Registry
//!
//! This crate provides database access for the student registry.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Student Registry Data Flow                         │
//! │                                                                         │
//! │  axum handler (POST /create_user/)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   registry-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ StudentRepo   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ StatusRepo    │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │ ExtraInfoRepo │    │              │  │   │
//! │  │   │ Management    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ./registry.db (DATABASE_PATH)                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types and constraint mapping
//! - [`repository`] - Repository implementations (student, status, extra info)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use registry_db::{Database, DbConfig};
//!
//! // Create database (migrations run on connect)
//! let db = Database::new(DbConfig::new("./registry.db")).await?;
//!
//! // Seed the status vocabulary once per process start
//! db.statuses().seed_status_table().await?;
//!
//! // Use repositories
//! let students = db.students().list_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::extra_info::ExtraInfoRepository;
pub use repository::status::StatusRepository;
pub use repository::student::StudentRepository;
