//! # Database Migrations
//!
//! Embedded SQL migrations for Wellnest.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  setup_database() / reset_database()                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Check _sqlx_migrations table                                          │
//! │       │                                                                 │
//! │       ├── Table doesn't exist? Create it                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Compare known migrations vs applied                                   │
//! │       │                                                                 │
//! │       ├── 0001_journal_entries.sql    ✓ (already applied)             │
//! │       └── 0002_journal_day_index.sql  ⬜ (NEW - needs to run)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Run each pending migration in its own transaction                     │
//! │       │                                                                 │
//! │       ├── OK   → record in _sqlx_migrations, continue                  │
//! │       └── FAIL → roll back that migration, stop, report error          │
//! │                  (earlier migrations stay applied)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNNN_description.sql` (e.g., `0003_add_metric_values.sql`)
//! 3. Write idempotent SQL (use `IF NOT EXISTS` where possible)
//! 4. **NEVER** modify existing migrations - always add new ones

use std::path::PathBuf;

use sqlx::migrate::Migrator;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

/// Embedded migrations from the `migrations/sqlite` directory.
///
/// The `sqlx::migrate!()` macro embeds all SQL files from the specified
/// directory into the binary at compile time.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Where a manager takes its migrations from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MigrationSet {
    /// The set compiled into the binary.
    #[default]
    Embedded,

    /// `NNNN_description.sql` files read from a directory at run time.
    ///
    /// Used by tests and tooling that need a non-standard schema.
    Directory(PathBuf),
}

impl MigrationSet {
    /// Number of migrations in the set.
    pub async fn count(&self) -> DbResult<usize> {
        match self {
            MigrationSet::Embedded => Ok(MIGRATOR.migrations.len()),
            MigrationSet::Directory(dir) => Ok(Migrator::new(dir.clone()).await?.migrations.len()),
        }
    }
}

/// Runs all pending database migrations.
///
/// ## Safety
/// - Idempotent: safe to run multiple times
/// - Transactional: each migration runs in its own transaction
/// - Ordered: migrations run in version order (0001, 0002, ...)
pub async fn run_migrations(pool: &SqlitePool, set: &MigrationSet) -> DbResult<()> {
    debug!(?set, "Checking for pending migrations");

    match set {
        MigrationSet::Embedded => MIGRATOR.run(pool).await?,
        MigrationSet::Directory(dir) => Migrator::new(dir.clone()).await?.run(pool).await?,
    }

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns information about migrations.
///
/// ## Returns
/// Tuple of (total_migrations, applied_migrations)
pub async fn migration_status(pool: &SqlitePool, set: &MigrationSet) -> DbResult<(usize, usize)> {
    let total = set.count().await?;

    let applied: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?;

    Ok((total, applied as usize))
}
