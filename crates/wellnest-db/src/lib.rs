//! # wellnest-db: Database Layer for Wellnest
//!
//! This crate owns the app's single SQLite database: opening it, migrating
//! it, running transactions against it and wiping it on request.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Wellnest Data Flow                               │
//! │                                                                         │
//! │  Repository call (add_entry)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   wellnest-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐   ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │DatabaseManager │   │  Repositories │    │  Migrations  │  │   │
//! │  │   │ (manager.rs)   │   │ (journal.rs)  │    │  (embedded)  │  │   │
//! │  │   │                │   │               │    │              │  │   │
//! │  │   │ read()         │◄──│ JournalRepo   │    │ 0001_*.sql   │  │   │
//! │  │   │ write()        │   │               │    │ 0002_*.sql   │  │   │
//! │  │   │ reset()        │   │               │    │              │  │   │
//! │  │   └────────────────┘   └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (WAL)                       │   │
//! │  │   <data dir>/wellnest.db                                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`manager`] - `DatabaseManager`: setup, transactions, reset
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository traits and SQLite implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wellnest_db::{DatabaseManager, DbConfig};
//!
//! let db = DatabaseManager::new(DbConfig::new("path/to/wellnest.db"));
//! db.setup_database().await?;
//!
//! let count = db
//!     .read(|conn| {
//!         Box::pin(async move {
//!             let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM journal_entries")
//!                 .fetch_one(&mut *conn)
//!                 .await?;
//!             Ok::<_, DbError>(n)
//!         })
//!     })
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod manager;
pub mod migrations;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use manager::{DatabaseManager, DatabaseService, DbConfig, DbStatus};
pub use migrations::MigrationSet;

pub use repository::journal::SqliteJournalRepository;
pub use repository::JournalRepository;
