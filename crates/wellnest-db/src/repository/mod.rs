//! # Repository Module
//!
//! Database repository traits and implementations for Wellnest.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Feature code                                                          │
//! │       │                                                                 │
//! │       │  container.journal_repository().await?.add_entry(entry)        │
//! │       ▼                                                                 │
//! │  Arc<dyn JournalRepository>                                            │
//! │  ├── SqliteJournalRepository   (production, this crate)                │
//! │  └── in-memory / failing fakes (mock container, app crate)             │
//! │       │                                                                 │
//! │       │  DatabaseManager::read / write                                  │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`JournalRepository`] - Journal entry CRUD and range queries

use std::fmt::Debug;

use async_trait::async_trait;
use wellnest_core::{DateRange, JournalEntry, NewJournalEntry};

use crate::error::DbResult;

pub mod journal;

/// Journal entry persistence.
///
/// Object-safe so the service container can hand out
/// `Arc<dyn JournalRepository>` and tests can substitute fakes.
#[async_trait]
pub trait JournalRepository: Send + Sync + Debug {
    /// Validates and stores a new entry, returning it with its generated id.
    async fn add_entry(&self, entry: NewJournalEntry) -> DbResult<JournalEntry>;

    /// Replaces day, mood and note of an existing entry.
    ///
    /// `created_at` is kept, `updated_at` is bumped.
    async fn update_entry(&self, id: &str, entry: NewJournalEntry) -> DbResult<JournalEntry>;

    /// Looks up one entry.
    async fn entry(&self, id: &str) -> DbResult<Option<JournalEntry>>;

    /// Entries whose day falls in `range`, oldest first.
    async fn entries_between(&self, range: DateRange) -> DbResult<Vec<JournalEntry>>;

    /// Deletes an entry. Deleting an unknown id is `NotFound`.
    async fn delete_entry(&self, id: &str) -> DbResult<()>;

    /// Total number of stored entries.
    async fn count(&self) -> DbResult<i64>;
}
