//! # App Error Types
//!
//! Errors raised while composing services.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Wellnest                               │
//! │                                                                         │
//! │  AppConfig::load() ── ConfigError ───────────────┐                     │
//! │                                                   ▼                     │
//! │  AppContainer::new() ── SettingsError ──► ContainerError ──► run()     │
//! │                                                   ▲                     │
//! │  journal_repository() ── status Failed ───────────┤                     │
//! │                        ── setup DbError ──────────┘                     │
//! │                                                                         │
//! │  run() logs database failures and continues in degraded mode;          │
//! │  configuration failures abort startup.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use wellnest_core::SettingsError;
use wellnest_db::DbError;

// =============================================================================
// Container Error
// =============================================================================

/// A capability could not be produced.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Database setup failed earlier; the repository is withheld until the
    /// caller recovers with `setup_database()` or `reset_database()`.
    #[error("Database unavailable: {reason}")]
    DatabaseUnavailable { reason: String },

    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl ContainerError {
    pub fn database_unavailable(reason: impl Into<String>) -> Self {
        ContainerError::DatabaseUnavailable {
            reason: reason.into(),
        }
    }
}

/// Result type for container accessors.
pub type ContainerResult<T> = Result<T, ContainerError>;

// =============================================================================
// Config Error
// =============================================================================

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value was present but unusable.
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Failed to read config file: {0}")]
    Io(String),

    /// No platform data directory and none configured.
    #[error("Could not determine app data directory")]
    NoDataDir,
}

impl ConfigError {
    pub fn invalid(key: &str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
