//! # Database Manager
//!
//! Owns the store's lifecycle and every transaction that touches it.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store Lifecycle                                 │
//! │                                                                         │
//! │   DatabaseManager::new(config)                                         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ┌──────────┐  setup_database() ok   ┌─────────┐                      │
//! │   │ NotReady │ ─────────────────────► │  Ready  │ ◄──┐                 │
//! │   └──────────┘                        └─────────┘    │ reset ok        │
//! │        │                                   │   └─────┘                  │
//! │        │ setup_database() err              │ setup_database() (no-op)  │
//! │        ▼                                   ▼                            │
//! │   ┌──────────────┐  setup_database() ok                                 │
//! │   │ Failed(why)  │ ───────────────────► Ready                           │
//! │   └──────────────┘                                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   read()    ── store.read() ──► query_only ──► BEGIN ... ROLLBACK      │
//! │                 (many at once, writes inside are rejected)             │
//! │                                                                         │
//! │   write()   ── write_lock ──► store.read() ──► BEGIN ... COMMIT        │
//! │                 (FIFO, one at a time)             or ROLLBACK on Err   │
//! │                                                                         │
//! │   setup / reset / close ── write_lock ──► store.write()                │
//! │                 (waits for in-flight reads, blocks new ones)           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! File-backed stores run in WAL mode, so a read transaction sees the last
//! committed snapshot even while a write is in flight on another connection.
//! Read connections run with `PRAGMA query_only`, so a read block can never
//! take SQLite's write lock behind the writers' backs.
//!
//! Blocks must not call back into the manager: a `write` inside a `write`
//! waits on its own lock forever.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::RwLock as StdRwLock;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Connection, SqliteConnection, SqlitePool};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::error::{DbError, DbResult};
use crate::migrations::{self, MigrationSet};

const IN_MEMORY_PATH: &str = ":memory:";
const BACKUP_SUFFIX: &str = ".reset-backup";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/wellnest.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file, or `:memory:`.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (one writer plus concurrent readers)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// How long a transaction waits for a free connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// How long SQLite retries a locked database file.
    /// Default: 5 seconds
    pub busy_timeout: Duration,

    /// Migrations applied by setup and reset.
    pub migrations: MigrationSet,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// The file (and its parent directory) is created on first setup.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            busy_timeout: Duration::from_secs(5),
            migrations: MigrationSet::Embedded,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection acquire timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the SQLite busy timeout.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets the migration source.
    pub fn migrations(mut self, migrations: MigrationSet) -> Self {
        self.migrations = migrations;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// The store lives as long as its single pooled connection, so the
    /// pool never expires it. Reset discards everything.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            busy_timeout: Duration::from_secs(5),
            migrations: MigrationSet::Embedded,
        }
    }

    /// Whether this configuration describes an in-memory store.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }
}

// =============================================================================
// Status
// =============================================================================

/// Observable store state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbStatus {
    /// `setup_database` has not run yet.
    NotReady,

    /// Migrated and accepting transactions.
    Ready,

    /// The last setup or reset failed; the reason is kept for diagnostics.
    Failed(String),
}

impl DbStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, DbStatus::Ready)
    }
}

#[derive(Debug)]
enum Store {
    NotReady,
    Ready(SqlitePool),
    Failed(String),
}

impl Store {
    fn pool(&self) -> DbResult<&SqlitePool> {
        match self {
            Store::Ready(pool) => Ok(pool),
            Store::NotReady => Err(DbError::NotReady(
                "setup_database has not completed".to_string(),
            )),
            Store::Failed(reason) => Err(DbError::NotReady(format!("setup failed: {}", reason))),
        }
    }
}

// =============================================================================
// Service Trait
// =============================================================================

/// The lifecycle surface of the database, as seen by the service container.
///
/// Transactions are generic over their block and live on
/// [`DatabaseManager`] directly; this trait carries only what a container
/// or a test double needs to expose.
#[async_trait]
pub trait DatabaseService: Send + Sync {
    /// Opens and migrates the store. Idempotent once Ready.
    async fn setup_database(&self) -> DbResult<()>;

    /// Replaces the store with a fresh, fully migrated one.
    async fn reset_database(&self) -> DbResult<()>;

    /// Current store state.
    fn status(&self) -> DbStatus;
}

// =============================================================================
// Database Manager
// =============================================================================

/// Single owner of the app's SQLite store.
///
/// ## Usage
/// ```rust,ignore
/// let db = DatabaseManager::new(DbConfig::new("./wellnest.db"));
/// db.setup_database().await?;
///
/// let id = db
///     .write_returning(|conn| {
///         Box::pin(async move {
///             sqlx::query("INSERT INTO journal_entries ...")
///                 .execute(&mut *conn)
///                 .await?;
///             Ok::<_, DbError>("new-id".to_string())
///         })
///     })
///     .await?;
/// ```
#[derive(Debug)]
pub struct DatabaseManager {
    config: DbConfig,
    store: RwLock<Store>,
    write_lock: Mutex<()>,
    status: StdRwLock<DbStatus>,
}

impl DatabaseManager {
    /// Creates a manager in the `NotReady` state. Nothing touches disk
    /// until [`setup_database`](Self::setup_database).
    pub fn new(config: DbConfig) -> Self {
        DatabaseManager {
            config,
            store: RwLock::new(Store::NotReady),
            write_lock: Mutex::new(()),
            status: StdRwLock::new(DbStatus::NotReady),
        }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Current store state.
    pub fn status(&self) -> DbStatus {
        self.status.read().expect("Status lock poisoned").clone()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Opens the store and applies pending migrations.
    ///
    /// ## Behavior
    /// - Ready already: re-checks migrations on the open pool, nothing else
    /// - NotReady / Failed: opens a new pool and migrates it
    /// - Any failure: status becomes `Failed(reason)`, returns `SetupFailed`;
    ///   migrations that succeeded before the failing one stay applied
    pub async fn setup_database(&self) -> DbResult<()> {
        let _writer = self.write_lock.lock().await;
        let mut store = self.store.write().await;

        info!(
            path = %self.config.database_path.display(),
            "Setting up database"
        );

        let result = match &*store {
            Store::Ready(pool) => migrations::run_migrations(pool, &self.config.migrations)
                .await
                .map(|_| pool.clone()),
            Store::NotReady | Store::Failed(_) => self.open_and_migrate().await,
        };

        match result {
            Ok(pool) => {
                self.install(&mut store, pool);
                info!("Database ready");
                Ok(())
            }
            Err(err) => {
                if let Store::Ready(pool) = &*store {
                    pool.close().await;
                }
                let reason = err.to_string();
                error!(error = %reason, "Database setup failed");
                self.fail(&mut store, reason.clone());
                Err(DbError::SetupFailed(reason))
            }
        }
    }

    /// Discards all data and rebuilds an empty, fully migrated store.
    ///
    /// ## Process
    /// ```text
    /// close pool ──► move db, -wal, -shm aside ──► open + migrate fresh file
    ///                                                   │
    ///                      ┌────────────── ok ──────────┴────── err ─────────┐
    ///                      ▼                                                 ▼
    ///              delete backups, Ready              delete fresh files, move
    ///                                                 backups back, reopen old
    ///                                                 store, ResetFailed
    /// ```
    ///
    /// In-memory stores cannot be restored: a failed reset leaves them
    /// `Failed`.
    pub async fn reset_database(&self) -> DbResult<()> {
        let _writer = self.write_lock.lock().await;
        let mut store = self.store.write().await;

        info!(
            path = %self.config.database_path.display(),
            "Resetting database"
        );

        let previous = self.status();
        if let Store::Ready(pool) = std::mem::replace(&mut *store, Store::NotReady) {
            pool.close().await;
        }

        if self.config.is_in_memory() {
            return match self.open_and_migrate().await {
                Ok(pool) => {
                    self.install(&mut store, pool);
                    info!("Database reset complete");
                    Ok(())
                }
                Err(err) => {
                    error!(error = %err, "Database reset failed");
                    self.fail(&mut store, err.to_string());
                    Err(DbError::ResetFailed(err.to_string()))
                }
            };
        }

        let path = self.config.database_path.clone();
        let backups = match move_store_aside(&path).await {
            Ok(backups) => backups,
            Err(err) => {
                error!(error = %err, "Could not move database files aside");
                self.restore_previous(&mut store, previous).await;
                return Err(DbError::ResetFailed(err.to_string()));
            }
        };
        debug!(files = backups.len(), "Database files moved aside");

        match self.open_and_migrate().await {
            Ok(pool) => {
                discard_backups(&backups).await;
                self.install(&mut store, pool);
                info!("Database reset complete");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Fresh store failed, restoring previous store");
                remove_store_files(&path).await;
                match restore_backups(&backups).await {
                    Ok(()) => self.restore_previous(&mut store, previous).await,
                    Err(restore_err) => {
                        error!(error = %restore_err, "Could not restore database files");
                        self.fail(
                            &mut store,
                            format!("reset failed and the previous store could not be restored: {}", restore_err),
                        );
                    }
                }
                Err(DbError::ResetFailed(err.to_string()))
            }
        }
    }

    /// Closes the pool. The manager returns to `NotReady` and can be set up again.
    pub async fn close(&self) {
        let _writer = self.write_lock.lock().await;
        let mut store = self.store.write().await;

        if let Store::Ready(pool) = &*store {
            info!("Closing database connection pool");
            pool.close().await;
        }
        *store = Store::NotReady;
        self.set_status(DbStatus::NotReady);
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        let store = self.store.read().await;
        match store.pool() {
            Ok(pool) => sqlx::query("SELECT 1").execute(pool).await.is_ok(),
            Err(_) => false,
        }
    }

    /// Returns `(total_migrations, applied_migrations)`.
    pub async fn migration_status(&self) -> DbResult<(usize, usize)> {
        let store = self.store.read().await;
        migrations::migration_status(store.pool()?, &self.config.migrations).await
    }

    // -------------------------------------------------------------------------
    // Transactions
    // -------------------------------------------------------------------------

    /// Runs `block` inside a read transaction.
    ///
    /// The connection is switched to `query_only` for the duration of the
    /// block, so any statement that writes fails with `QueryFailed`. Reads
    /// run concurrently with each other and with an in-flight write, and
    /// never observe uncommitted data.
    pub async fn read<F, T>(&self, block: F) -> DbResult<T>
    where
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, DbResult<T>> + Send,
        T: Send,
    {
        let store = self.store.read().await;
        let mut conn = store.pool()?.acquire().await?;
        set_query_only(&mut conn, true).await?;

        let result = match Connection::begin(&mut *conn).await {
            Ok(mut tx) => {
                let result = block(&mut *tx).await;
                if let Err(err) = tx.rollback().await {
                    warn!(error = %err, "Read transaction rollback failed");
                }
                result
            }
            Err(err) => Err(DbError::TransactionFailed(err.to_string())),
        };

        if let Err(err) = set_query_only(&mut conn, false).await {
            warn!(error = %err, "Could not leave query_only, dropping connection");
            drop(conn.detach());
        }
        result
    }

    /// Runs `block` inside a write transaction.
    ///
    /// Commits when the block returns `Ok`, rolls back and returns the
    /// block's error otherwise. Writers run one at a time in arrival order.
    pub async fn write<F>(&self, block: F) -> DbResult<()>
    where
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, DbResult<()>> + Send,
    {
        self.write_returning(block).await
    }

    /// Like [`write`](Self::write), returning the block's value after commit.
    ///
    /// The value is only handed back once the commit succeeded, so it
    /// always matches what a later read sees.
    pub async fn write_returning<F, T>(&self, block: F) -> DbResult<T>
    where
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, DbResult<T>> + Send,
        T: Send,
    {
        let _writer = self.write_lock.lock().await;
        let store = self.store.read().await;
        let mut conn = store.pool()?.acquire().await?;
        // A cancelled read can hand its connection back still query_only.
        set_query_only(&mut conn, false).await?;

        let mut tx = Connection::begin(&mut *conn)
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        match block(&mut *tx).await {
            Ok(value) => {
                tx.commit()
                    .await
                    .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
                debug!("Write transaction committed");
                Ok(value)
            }
            Err(err) => {
                debug!(error = %err, "Write block failed, rolling back");
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Write transaction rollback failed");
                }
                Err(err)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn set_status(&self, status: DbStatus) {
        *self.status.write().expect("Status lock poisoned") = status;
    }

    fn install(&self, store: &mut Store, pool: SqlitePool) {
        *store = Store::Ready(pool);
        self.set_status(DbStatus::Ready);
    }

    fn fail(&self, store: &mut Store, reason: String) {
        *store = Store::Failed(reason.clone());
        self.set_status(DbStatus::Failed(reason));
    }

    /// Puts back whatever state the store had before a failed reset.
    ///
    /// The old file was already migrated, so it is reopened without
    /// re-running migrations. A missing file is never re-created here: an
    /// empty unmigrated store would read as `Ready`.
    async fn restore_previous(&self, store: &mut Store, previous: DbStatus) {
        match previous {
            DbStatus::Ready => match self.open_pool(false).await {
                Ok(pool) => {
                    self.install(store, pool);
                    info!("Previous store restored");
                }
                Err(err) => {
                    error!(error = %err, "Previous store could not be reopened");
                    self.fail(store, format!("previous store could not be reopened: {}", err));
                }
            },
            DbStatus::Failed(reason) => self.fail(store, reason),
            DbStatus::NotReady => {
                *store = Store::NotReady;
                self.set_status(DbStatus::NotReady);
            }
        }
    }

    async fn open_and_migrate(&self) -> DbResult<SqlitePool> {
        let pool = self.open_pool(true).await?;
        if let Err(err) = migrations::run_migrations(&pool, &self.config.migrations).await {
            pool.close().await;
            return Err(err);
        }
        Ok(pool)
    }

    /// Creates the connection pool.
    ///
    /// File stores: WAL journal, NORMAL synchronous, foreign keys on.
    /// With `create`, the file and its parent directory are created if
    /// missing; without it a missing file is a `ConnectionFailed`.
    async fn open_pool(&self, create: bool) -> DbResult<SqlitePool> {
        let config = &self.config;

        let options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            if let Some(parent) = config.database_path.parent().filter(|_| create) {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
                }
            }
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .create_if_missing(create)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        }
        .foreign_keys(true)
        .busy_timeout(config.busy_timeout);

        debug!("Connection options configured");

        let pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout);

        let pool_options = if config.is_in_memory() {
            pool_options
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            pool_options.idle_timeout(Some(config.idle_timeout))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );
        Ok(pool)
    }
}

#[async_trait]
impl DatabaseService for DatabaseManager {
    async fn setup_database(&self) -> DbResult<()> {
        DatabaseManager::setup_database(self).await
    }

    async fn reset_database(&self) -> DbResult<()> {
        DatabaseManager::reset_database(self).await
    }

    fn status(&self) -> DbStatus {
        DatabaseManager::status(self)
    }
}

// =============================================================================
// Store Files
// =============================================================================

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// The database file plus the sidecars SQLite may leave next to it.
fn store_files(path: &Path) -> Vec<PathBuf> {
    ["", "-wal", "-shm", "-journal"]
        .iter()
        .map(|suffix| with_suffix(path, suffix))
        .collect()
}

/// Renames every existing store file to `<file>.reset-backup`.
///
/// On failure, files already moved are put back before returning.
async fn move_store_aside(path: &Path) -> std::io::Result<Vec<(PathBuf, PathBuf)>> {
    let mut moved = Vec::new();

    for file in store_files(path) {
        if !tokio::fs::try_exists(&file).await? {
            continue;
        }
        let backup = with_suffix(&file, BACKUP_SUFFIX);
        if let Err(err) = tokio::fs::rename(&file, &backup).await {
            if let Err(restore_err) = restore_backups(&moved).await {
                error!(error = %restore_err, "Could not restore partially moved files");
            }
            return Err(err);
        }
        moved.push((file, backup));
    }

    Ok(moved)
}

async fn restore_backups(moved: &[(PathBuf, PathBuf)]) -> std::io::Result<()> {
    for (original, backup) in moved.iter().rev() {
        tokio::fs::rename(backup, original).await?;
    }
    Ok(())
}

async fn discard_backups(moved: &[(PathBuf, PathBuf)]) {
    for (_, backup) in moved {
        if let Err(err) = tokio::fs::remove_file(backup).await {
            warn!(path = %backup.display(), error = %err, "Could not delete backup");
        }
    }
}

async fn remove_store_files(path: &Path) {
    for file in store_files(path) {
        match tokio::fs::remove_file(&file).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!(path = %file.display(), error = %err, "Could not delete store file"),
        }
    }
}

async fn set_query_only(conn: &mut SqliteConnection, on: bool) -> DbResult<()> {
    let pragma = if on {
        "PRAGMA query_only = ON"
    } else {
        "PRAGMA query_only = OFF"
    };
    sqlx::query(pragma)
        .execute(conn)
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    async fn count_entries(db: &DatabaseManager) -> DbResult<i64> {
        db.read(|conn| {
            Box::pin(async move {
                let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM journal_entries")
                    .fetch_one(&mut *conn)
                    .await?;
                Ok::<_, DbError>(n)
            })
        })
        .await
    }

    async fn insert_entry(db: &DatabaseManager, id: &str) -> DbResult<()> {
        let id = id.to_string();
        db.write(move |conn| {
            Box::pin(async move {
                sqlx::query(
                    "INSERT INTO journal_entries (id, day, mood, created_at, updated_at) \
                     VALUES (?1, '2026-03-14', 3, '2026-03-14T08:00:00Z', '2026-03-14T08:00:00Z')",
                )
                .bind(id)
                .execute(&mut *conn)
                .await?;
                Ok::<_, DbError>(())
            })
        })
        .await
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2)
            .busy_timeout(Duration::from_secs(1));

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.busy_timeout, Duration::from_secs(1));
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }

    #[test]
    fn test_store_files_include_sidecars() {
        let files = store_files(Path::new("/data/wellnest.db"));
        assert_eq!(files[0], PathBuf::from("/data/wellnest.db"));
        assert_eq!(files[1], PathBuf::from("/data/wellnest.db-wal"));
        assert_eq!(
            with_suffix(&files[1], BACKUP_SUFFIX),
            PathBuf::from("/data/wellnest.db-wal.reset-backup")
        );
    }

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = DatabaseManager::new(DbConfig::in_memory());
        assert_eq!(db.status(), DbStatus::NotReady);
        assert!(!db.health_check().await);

        db.setup_database().await.unwrap();

        assert_eq!(db.status(), DbStatus::Ready);
        assert!(db.health_check().await);
        let (total, applied) = db.migration_status().await.unwrap();
        assert_eq!(total, applied);
    }

    #[tokio::test]
    async fn test_transactions_before_setup_are_rejected() {
        let db = DatabaseManager::new(DbConfig::in_memory());

        let err = count_entries(&db).await.unwrap_err();
        assert!(matches!(err, DbError::NotReady(_)));

        let err = insert_entry(&db, "a").await.unwrap_err();
        assert!(matches!(err, DbError::NotReady(_)));
    }

    #[tokio::test]
    async fn test_in_memory_reset_discards_data() {
        let db = DatabaseManager::new(DbConfig::in_memory());
        db.setup_database().await.unwrap();
        insert_entry(&db, "a").await.unwrap();
        assert_eq!(count_entries(&db).await.unwrap(), 1);

        db.reset_database().await.unwrap();

        assert_eq!(db.status(), DbStatus::Ready);
        assert_eq!(count_entries(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_close_returns_to_not_ready() {
        let db = DatabaseManager::new(DbConfig::in_memory());
        db.setup_database().await.unwrap();

        db.close().await;

        assert_eq!(db.status(), DbStatus::NotReady);
        assert!(matches!(count_entries(&db).await, Err(DbError::NotReady(_))));
    }

    #[tokio::test]
    async fn test_read_rejects_writes() {
        let db = DatabaseManager::new(DbConfig::in_memory());
        db.setup_database().await.unwrap();

        let err = db
            .read(|conn| {
                Box::pin(async move {
                    sqlx::query(
                        "INSERT INTO journal_entries (id, day, mood, created_at, updated_at) \
                         VALUES ('x', '2026-03-14', 3, 'now', 'now')",
                    )
                    .execute(&mut *conn)
                    .await?;
                    Ok::<_, DbError>(())
                })
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::QueryFailed(ref msg) if msg.contains("readonly")));
        assert_eq!(count_entries(&db).await.unwrap(), 0);

        // The pooled connection is writable again afterwards.
        insert_entry(&db, "a").await.unwrap();
        assert_eq!(count_entries(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_restore_does_not_recreate_missing_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("wellnest.db");
        let db = DatabaseManager::new(DbConfig::new(&path));
        db.setup_database().await.unwrap();

        let mut store = db.store.write().await;
        if let Store::Ready(pool) = std::mem::replace(&mut *store, Store::NotReady) {
            pool.close().await;
        }
        remove_store_files(&path).await;

        db.restore_previous(&mut store, DbStatus::Ready).await;
        drop(store);

        assert!(matches!(db.status(), DbStatus::Failed(_)));
        assert!(!path.exists());
        assert!(matches!(count_entries(&db).await, Err(DbError::NotReady(_))));
    }

    #[tokio::test]
    async fn test_migration_status_reports_storage_errors() {
        let db = DatabaseManager::new(DbConfig::in_memory());
        db.setup_database().await.unwrap();

        db.write(|conn| {
            Box::pin(async move {
                sqlx::query("DROP TABLE _sqlx_migrations")
                    .execute(&mut *conn)
                    .await?;
                Ok::<_, DbError>(())
            })
        })
        .await
        .unwrap();

        let err = db.migration_status().await.unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(_)));
    }
}
