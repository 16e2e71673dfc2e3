//! # Wellnest App Library
//!
//! Composition root for the Wellnest journal: builds the service container,
//! brings the database up, and hands out the [`Environment`] screens use.
//!
//! ## Module Organization
//! ```text
//! wellnest_app/
//! ├── lib.rs            ◄─── You are here (startup & tracing)
//! ├── config.rs         ◄─── Layered AppConfig (defaults, TOML, env)
//! ├── error.rs          ◄─── ContainerError, ConfigError
//! ├── capabilities.rs   ◄─── One trait per service
//! ├── environment.rs    ◄─── Root container + scoped override
//! ├── container/
//! │   ├── mod.rs        ◄─── ServiceContainer trait
//! │   ├── app.rs        ◄─── Production singletons (OnceLock)
//! │   ├── mock.rs       ◄─── Overridable test container
//! │   └── fakes.rs      ◄─── In-memory journal, stub database, ...
//! └── services/         ◄─── Toasts, navigation, theme, tutorials, ...
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Load Configuration ───────────────────────────────────────────────► │
//! │     • defaults → wellnest.toml → WELLNEST_* variables                  │
//! │                                                                         │
//! │  2. Initialize Logging ───────────────────────────────────────────────► │
//! │     • RUST_LOG if set, otherwise config.log_filter                     │
//! │                                                                         │
//! │  3. Build Container ──────────────────────────────────────────────────► │
//! │     • settings file opened, everything else lazy                       │
//! │                                                                         │
//! │  4. Set Up Database ──────────────────────────────────────────────────► │
//! │     • open SQLite (WAL), apply pending migrations                      │
//! │     • on failure: log, keep going without persisted data               │
//! │                                                                         │
//! │  5. Report Status ────────────────────────────────────────────────────► │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod capabilities;
pub mod config;
pub mod container;
pub mod environment;
pub mod error;
pub mod services;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use wellnest_db::DatabaseManager;

pub use config::AppConfig;
pub use container::{AppContainer, MockContainer, MockOverrides, ServiceContainer};
pub use environment::Environment;
pub use error::{ConfigError, ContainerError, ContainerResult};

/// Loads configuration, initializes tracing, and starts the app.
///
/// `config_path` replaces the platform config file location.
pub async fn run(config_path: Option<PathBuf>) -> ContainerResult<Arc<AppContainer>> {
    let config = AppConfig::load(config_path)?;
    init_tracing(&config.log_filter);

    info!("Starting Wellnest");
    start(config).await
}

/// Builds the container and sets up the database.
///
/// A database failure does not abort startup: the container comes back in
/// degraded mode, the status reads `Failed`, and the journal repository
/// reports `DatabaseUnavailable` until the caller recovers.
pub async fn start(config: AppConfig) -> ContainerResult<Arc<AppContainer>> {
    info!(
        database = %config.database_path.display(),
        data_dir = %config.data_dir.display(),
        "Configuration loaded"
    );

    let container = Arc::new(AppContainer::new(config)?);
    let db = container.database_manager();

    match db.setup_database().await {
        Ok(()) => {
            report_migrations(&db).await;
        }
        Err(e) => {
            error!(error = %e, "Database setup failed");
            warn!("Continuing without persisted data");
        }
    }

    let tutorials = container.tutorials();
    let pending: Vec<String> = tutorials
        .catalog()
        .iter()
        .filter(|t| !tutorials.is_completed(t.id()).unwrap_or(false))
        .map(|t| t.id().to_string())
        .collect();

    info!(
        status = ?db.status(),
        onboarded = container.onboarding().has_completed().unwrap_or(false),
        theme = %container.theme().theme(),
        pending_tutorials = ?pending,
        "Startup complete"
    );

    Ok(container)
}

/// Logs how many migrations are applied. A failure to read the count is
/// logged and does not undo a setup that already succeeded.
async fn report_migrations(db: &DatabaseManager) -> Option<(usize, usize)> {
    match db.migration_status().await {
        Ok((total, applied)) => {
            info!(migrations = total, applied, "Database ready");
            Some((total, applied))
        }
        Err(e) => {
            warn!(error = %e, "Could not read migration status");
            None
        }
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=wellnest_db=trace` - Trace the database crate only
/// - Default: `default_filter` (from config)
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellnest_db::DbConfig;

    #[tokio::test]
    async fn test_report_migrations_tolerates_unreadable_status() {
        let db = DatabaseManager::new(DbConfig::in_memory());
        assert_eq!(report_migrations(&db).await, None);

        db.setup_database().await.unwrap();
        let (total, applied) = report_migrations(&db).await.unwrap();
        assert_eq!(total, applied);
    }

    #[tokio::test]
    async fn test_start_in_memory() {
        let container = start(AppConfig::in_memory()).await.unwrap();
        assert_eq!(container.database().status(), wellnest_db::DbStatus::Ready);
        container.shutdown().await;
    }
}
