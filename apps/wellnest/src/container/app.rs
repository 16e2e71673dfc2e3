//! Production container.

use std::fmt;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tracing::{info, warn};
use wellnest_core::{MemorySettingsStore, SettingsStore};
use wellnest_db::{DatabaseManager, DbStatus, SqliteJournalRepository};

use crate::capabilities::{
    DatabaseService, JournalRepository, MetricRegistry, NavigationService, OnboardingService,
    ThemeService, TimePeriodService, ToastService, TutorialService,
};
use crate::config::AppConfig;
use crate::error::{ContainerError, ContainerResult};
use crate::services::{
    FileSettingsStore, MetricCatalog, NavigationStack, OnboardingManager, ThemeManager,
    TimePeriodManager, ToastCenter, TutorialManager,
};

use super::ServiceContainer;

/// Wires the real services. Everything except the settings store is built
/// on first access.
pub struct AppContainer {
    config: AppConfig,
    settings: Arc<dyn SettingsStore>,
    database: OnceLock<Arc<DatabaseManager>>,
    journal: OnceLock<Arc<SqliteJournalRepository>>,
    toasts: OnceLock<Arc<ToastCenter>>,
    navigation: OnceLock<Arc<NavigationStack>>,
    theme: OnceLock<Arc<ThemeManager>>,
    tutorials: OnceLock<Arc<TutorialManager>>,
    metrics: OnceLock<Arc<MetricCatalog>>,
    time_period: OnceLock<Arc<TimePeriodManager>>,
    onboarding: OnceLock<Arc<OnboardingManager>>,
}

impl AppContainer {
    /// Opens the settings store named by `config`. The database is not
    /// touched until [`setup_database`](DatabaseService::setup_database) or
    /// the first repository access.
    pub fn new(config: AppConfig) -> ContainerResult<Self> {
        let settings: Arc<dyn SettingsStore> = match &config.settings_path {
            Some(path) => {
                info!(path = %path.display(), "Opening settings");
                Arc::new(FileSettingsStore::open(path.clone())?)
            }
            None => Arc::new(MemorySettingsStore::new()),
        };

        Ok(AppContainer {
            config,
            settings,
            database: OnceLock::new(),
            journal: OnceLock::new(),
            toasts: OnceLock::new(),
            navigation: OnceLock::new(),
            theme: OnceLock::new(),
            tutorials: OnceLock::new(),
            metrics: OnceLock::new(),
            time_period: OnceLock::new(),
            onboarding: OnceLock::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn settings(&self) -> Arc<dyn SettingsStore> {
        Arc::clone(&self.settings)
    }

    /// The concrete manager, for transactions and diagnostics.
    pub fn database_manager(&self) -> Arc<DatabaseManager> {
        self.database
            .get_or_init(|| Arc::new(DatabaseManager::new(self.config.db_config())))
            .clone()
    }

    /// Closes the pool if it was ever opened.
    pub async fn shutdown(&self) {
        if let Some(db) = self.database.get() {
            db.close().await;
        }
        info!("Container shut down");
    }
}

impl fmt::Debug for AppContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContainer")
            .field("config", &self.config)
            .field("database", &self.database.get().map(|db| db.status()))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ServiceContainer for AppContainer {
    fn database(&self) -> Arc<dyn DatabaseService> {
        self.database_manager()
    }

    async fn journal_repository(&self) -> ContainerResult<Arc<dyn JournalRepository>> {
        let db = self.database_manager();

        match db.status() {
            DbStatus::Ready => {}
            DbStatus::NotReady => {
                db.setup_database().await.map_err(|e| {
                    warn!(error = %e, "Database setup failed on first repository access");
                    ContainerError::database_unavailable(e.to_string())
                })?;
            }
            DbStatus::Failed(reason) => {
                return Err(ContainerError::database_unavailable(reason));
            }
        }

        let journal: Arc<dyn JournalRepository> = self
            .journal
            .get_or_init(|| Arc::new(SqliteJournalRepository::new(db)))
            .clone();
        Ok(journal)
    }

    fn toasts(&self) -> Arc<dyn ToastService> {
        self.toasts
            .get_or_init(|| Arc::new(ToastCenter::new()))
            .clone()
    }

    fn navigation(&self) -> Arc<dyn NavigationService> {
        self.navigation
            .get_or_init(|| Arc::new(NavigationStack::new()))
            .clone()
    }

    fn theme(&self) -> Arc<dyn ThemeService> {
        self.theme
            .get_or_init(|| Arc::new(ThemeManager::new(self.settings())))
            .clone()
    }

    fn tutorials(&self) -> Arc<dyn TutorialService> {
        self.tutorials
            .get_or_init(|| Arc::new(TutorialManager::new(self.settings())))
            .clone()
    }

    fn metrics(&self) -> Arc<dyn MetricRegistry> {
        self.metrics
            .get_or_init(|| Arc::new(MetricCatalog::new()))
            .clone()
    }

    fn time_period(&self) -> Arc<dyn TimePeriodService> {
        self.time_period
            .get_or_init(|| Arc::new(TimePeriodManager::new(self.settings())))
            .clone()
    }

    fn onboarding(&self) -> Arc<dyn OnboardingService> {
        self.onboarding
            .get_or_init(|| Arc::new(OnboardingManager::new(self.settings())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_repository_triggers_setup_once() {
        let container = AppContainer::new(AppConfig::in_memory()).unwrap();
        assert_eq!(container.database().status(), DbStatus::NotReady);

        let first = container.journal_repository().await.unwrap();
        let second = container.journal_repository().await.unwrap();

        assert_eq!(container.database().status(), DbStatus::Ready);
        assert!(Arc::ptr_eq(&first, &second));
        container.shutdown().await;
    }

    #[tokio::test]
    async fn test_settings_file_is_shared_by_services() {
        let dir = TempDir::new().unwrap();
        let container = AppContainer::new(AppConfig::in_dir(dir.path())).unwrap();

        container.onboarding().complete().unwrap();
        assert!(dir.path().join("settings.json").exists());

        let reopened = AppContainer::new(AppConfig::in_dir(dir.path())).unwrap();
        assert!(reopened.onboarding().has_completed().unwrap());
    }

    #[test]
    fn test_corrupt_settings_fail_construction() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("settings.json"), "[1, 2").unwrap();

        let err = AppContainer::new(AppConfig::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, ContainerError::Settings(_)));
    }
}
