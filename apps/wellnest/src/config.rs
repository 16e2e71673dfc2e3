//! # App Configuration
//!
//! Where the database and settings live, how verbose logging is, and how
//! the connection pool is sized.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     WELLNEST_DATA_DIR=/tmp/wellnest                                    │
//! │     WELLNEST_DB_PATH=/tmp/wellnest/dev.db                              │
//! │     WELLNEST_LOG=debug                                                 │
//! │     WELLNEST_DB_MAX_CONNECTIONS=3                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/wellnest/wellnest.toml (Linux)                           │
//! │     ~/Library/Application Support/app.wellnest.wellnest/wellnest.toml  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     platform data dir, wellnest.db, settings.json                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # wellnest.toml
//! data_dir = "/Users/me/wellnest-dev"
//! log_filter = "info,wellnest=trace"
//! max_connections = 5
//! acquire_timeout_secs = 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use wellnest_db::DbConfig;

use crate::error::{ConfigError, ConfigResult};

pub const DATABASE_FILE: &str = "wellnest.db";
pub const SETTINGS_FILE: &str = "settings.json";
pub const CONFIG_FILE: &str = "wellnest.toml";
pub const DEFAULT_LOG_FILTER: &str = "info,wellnest=debug,sqlx=warn";

const ENV_DATA_DIR: &str = "WELLNEST_DATA_DIR";
const ENV_DB_PATH: &str = "WELLNEST_DB_PATH";
const ENV_LOG: &str = "WELLNEST_LOG";
const ENV_MAX_CONNECTIONS: &str = "WELLNEST_DB_MAX_CONNECTIONS";

// =============================================================================
// Config Layer
// =============================================================================

/// One source's worth of settings. Unset fields fall through to the layer
/// below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub data_dir: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub log_filter: Option<String>,
    pub max_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
}

impl ConfigLayer {
    /// Parses a `wellnest.toml` document.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads the `WELLNEST_*` variables through `lookup`.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let layer = ConfigLayer::from_env(|key| std::env::var(key).ok())?;
    /// ```
    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let max_connections = match lookup(ENV_MAX_CONNECTIONS) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u32>()
                    .map_err(|e| ConfigError::invalid(ENV_MAX_CONNECTIONS, raw.clone(), e.to_string()))?,
            ),
            None => None,
        };

        Ok(ConfigLayer {
            data_dir: lookup(ENV_DATA_DIR).map(PathBuf::from),
            database_path: lookup(ENV_DB_PATH).map(PathBuf::from),
            log_filter: lookup(ENV_LOG),
            max_connections,
            acquire_timeout_secs: None,
        })
    }

    /// Overlays `other` on top of `self`; set fields in `other` win.
    pub fn merge(&mut self, other: ConfigLayer) {
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
        if other.database_path.is_some() {
            self.database_path = other.database_path;
        }
        if other.log_filter.is_some() {
            self.log_filter = other.log_filter;
        }
        if other.max_connections.is_some() {
            self.max_connections = other.max_connections;
        }
        if other.acquire_timeout_secs.is_some() {
            self.acquire_timeout_secs = other.acquire_timeout_secs;
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the database and settings file.
    pub data_dir: PathBuf,

    /// SQLite file, or `:memory:`.
    pub database_path: PathBuf,

    /// JSON settings file. `None` keeps settings in memory.
    pub settings_path: Option<PathBuf>,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Connection pool size.
    pub max_connections: u32,

    /// How long a transaction waits for a pooled connection.
    pub acquire_timeout_secs: u64,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`wellnest.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut layer = ConfigLayer::default();

        if let Some(path) = config_path.or_else(default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                layer = ConfigLayer::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        layer.merge(ConfigLayer::from_env(|key| std::env::var(key).ok())?);

        let data_dir = match layer.data_dir.take() {
            Some(dir) => dir,
            None => default_data_dir().ok_or(ConfigError::NoDataDir)?,
        };

        let config = Self::resolve(data_dir, layer);
        config.validate()?;
        Ok(config)
    }

    /// Builds a config rooted at `data_dir`, with `layer` applied on top of
    /// the defaults.
    pub fn resolve(data_dir: PathBuf, layer: ConfigLayer) -> Self {
        let data_dir = layer.data_dir.unwrap_or(data_dir);
        let database_path = layer
            .database_path
            .unwrap_or_else(|| data_dir.join(DATABASE_FILE));

        AppConfig {
            settings_path: Some(data_dir.join(SETTINGS_FILE)),
            database_path,
            log_filter: layer
                .log_filter
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            max_connections: layer.max_connections.unwrap_or(5),
            acquire_timeout_secs: layer.acquire_timeout_secs.unwrap_or(30),
            data_dir,
        }
    }

    /// Everything in memory: an in-memory database and settings store.
    /// Nothing is written to disk.
    pub fn in_memory() -> Self {
        AppConfig {
            data_dir: PathBuf::new(),
            database_path: DbConfig::in_memory().database_path,
            settings_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            max_connections: 1,
            acquire_timeout_secs: 5,
        }
    }

    /// File-backed config rooted in `dir` (tests and tooling).
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::resolve(dir.as_ref().to_path_buf(), ConfigLayer::default())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_connections == 0 {
            return Err(ConfigError::invalid(
                "max_connections",
                "0",
                "pool needs at least one connection",
            ));
        }

        if self.acquire_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "acquire_timeout_secs",
                "0",
                "timeout must be positive",
            ));
        }

        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::invalid("database_path", "", "path is empty"));
        }

        Ok(())
    }

    /// Database settings derived from this config.
    pub fn db_config(&self) -> DbConfig {
        let base = if self.database_path == DbConfig::in_memory().database_path {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.database_path).max_connections(self.max_connections)
        };
        base.connect_timeout(Duration::from_secs(self.acquire_timeout_secs))
    }
}

/// Returns the platform data directory.
fn default_data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Returns the default config file path.
fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("app", "wellnest", "wellnest")
}
