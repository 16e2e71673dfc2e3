//! # Mock Container
//!
//! Container for tests and previews. Every capability defaults to a fake
//! (or to the production service over an in-memory settings store) and can
//! be replaced at construction through [`MockOverrides`] or afterwards
//! through a setter.
//!
//! ```rust,ignore
//! let mock = MockContainer::new(MockOverrides {
//!     journal: Some(Arc::new(InMemoryJournalRepository::seeded(5))),
//!     ..Default::default()
//! });
//! mock.set_toasts(Arc::new(RecordingToasts::new()));
//! ```

use std::fmt;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use wellnest_core::settings::ONBOARDING_COMPLETED_KEY;
use wellnest_core::{MemorySettingsStore, SettingsStore};
use wellnest_db::DbStatus;

use crate::capabilities::{
    DatabaseService, JournalRepository, MetricRegistry, NavigationService, OnboardingService,
    ThemeService, TimePeriodService, ToastService, TutorialService,
};
use crate::error::{ContainerError, ContainerResult};
use crate::services::{
    MetricCatalog, NavigationStack, OnboardingManager, ThemeManager, TimePeriodManager,
    TutorialManager,
};

use super::fakes::{InMemoryJournalRepository, RecordingToasts, StubDatabase};
use super::ServiceContainer;

/// Capabilities to use instead of the defaults. `None` keeps the default.
#[derive(Default)]
pub struct MockOverrides {
    /// Backing store for the settings-based defaults.
    pub settings: Option<Arc<dyn SettingsStore>>,
    pub database: Option<Arc<dyn DatabaseService>>,
    pub journal: Option<Arc<dyn JournalRepository>>,
    pub toasts: Option<Arc<dyn ToastService>>,
    pub navigation: Option<Arc<dyn NavigationService>>,
    pub theme: Option<Arc<dyn ThemeService>>,
    pub tutorials: Option<Arc<dyn TutorialService>>,
    pub metrics: Option<Arc<dyn MetricRegistry>>,
    pub time_period: Option<Arc<dyn TimePeriodService>>,
    pub onboarding: Option<Arc<dyn OnboardingService>>,
}

pub struct MockContainer {
    settings: Arc<dyn SettingsStore>,
    database: RwLock<Arc<dyn DatabaseService>>,
    journal: RwLock<Arc<dyn JournalRepository>>,
    toasts: RwLock<Arc<dyn ToastService>>,
    navigation: RwLock<Arc<dyn NavigationService>>,
    theme: RwLock<Arc<dyn ThemeService>>,
    tutorials: RwLock<Arc<dyn TutorialService>>,
    metrics: RwLock<Arc<dyn MetricRegistry>>,
    time_period: RwLock<Arc<dyn TimePeriodService>>,
    onboarding: RwLock<Arc<dyn OnboardingService>>,
}

impl MockContainer {
    pub fn new(overrides: MockOverrides) -> Self {
        let settings: Arc<dyn SettingsStore> = overrides
            .settings
            .unwrap_or_else(|| Arc::new(MemorySettingsStore::new()));

        MockContainer {
            database: RwLock::new(
                overrides
                    .database
                    .unwrap_or_else(|| Arc::new(StubDatabase::new())),
            ),
            journal: RwLock::new(
                overrides
                    .journal
                    .unwrap_or_else(|| Arc::new(InMemoryJournalRepository::new())),
            ),
            toasts: RwLock::new(
                overrides
                    .toasts
                    .unwrap_or_else(|| Arc::new(RecordingToasts::new())),
            ),
            navigation: RwLock::new(
                overrides
                    .navigation
                    .unwrap_or_else(|| Arc::new(NavigationStack::new())),
            ),
            theme: RwLock::new(
                overrides
                    .theme
                    .unwrap_or_else(|| Arc::new(ThemeManager::new(settings.clone()))),
            ),
            tutorials: RwLock::new(
                overrides
                    .tutorials
                    .unwrap_or_else(|| Arc::new(TutorialManager::new(settings.clone()))),
            ),
            metrics: RwLock::new(
                overrides
                    .metrics
                    .unwrap_or_else(|| Arc::new(MetricCatalog::new())),
            ),
            time_period: RwLock::new(
                overrides
                    .time_period
                    .unwrap_or_else(|| Arc::new(TimePeriodManager::new(settings.clone()))),
            ),
            onboarding: RwLock::new(
                overrides
                    .onboarding
                    .unwrap_or_else(|| Arc::new(OnboardingManager::new(settings.clone()))),
            ),
            settings,
        }
    }

    /// Preview data: 30 seeded days, onboarding already done.
    pub fn preview() -> Self {
        let settings = Arc::new(MemorySettingsStore::with_values([(
            ONBOARDING_COMPLETED_KEY,
            "true",
        )]));

        MockContainer::new(MockOverrides {
            settings: Some(settings),
            journal: Some(Arc::new(InMemoryJournalRepository::seeded(30))),
            ..Default::default()
        })
    }

    pub fn settings(&self) -> Arc<dyn SettingsStore> {
        Arc::clone(&self.settings)
    }

    pub fn set_database(&self, database: Arc<dyn DatabaseService>) {
        *self.database.write().expect("Mock lock poisoned") = database;
    }

    pub fn set_journal_repository(&self, journal: Arc<dyn JournalRepository>) {
        *self.journal.write().expect("Mock lock poisoned") = journal;
    }

    pub fn set_toasts(&self, toasts: Arc<dyn ToastService>) {
        *self.toasts.write().expect("Mock lock poisoned") = toasts;
    }

    pub fn set_navigation(&self, navigation: Arc<dyn NavigationService>) {
        *self.navigation.write().expect("Mock lock poisoned") = navigation;
    }

    pub fn set_theme(&self, theme: Arc<dyn ThemeService>) {
        *self.theme.write().expect("Mock lock poisoned") = theme;
    }

    pub fn set_tutorials(&self, tutorials: Arc<dyn TutorialService>) {
        *self.tutorials.write().expect("Mock lock poisoned") = tutorials;
    }

    pub fn set_metrics(&self, metrics: Arc<dyn MetricRegistry>) {
        *self.metrics.write().expect("Mock lock poisoned") = metrics;
    }

    pub fn set_time_period(&self, time_period: Arc<dyn TimePeriodService>) {
        *self.time_period.write().expect("Mock lock poisoned") = time_period;
    }

    pub fn set_onboarding(&self, onboarding: Arc<dyn OnboardingService>) {
        *self.onboarding.write().expect("Mock lock poisoned") = onboarding;
    }
}

impl Default for MockContainer {
    fn default() -> Self {
        Self::new(MockOverrides::default())
    }
}

impl fmt::Debug for MockContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockContainer")
            .field("database", &self.database().status())
            .finish_non_exhaustive()
    }
}

fn current<T: ?Sized>(slot: &RwLock<Arc<T>>) -> Arc<T> {
    Arc::clone(&slot.read().expect("Mock lock poisoned"))
}

#[async_trait]
impl ServiceContainer for MockContainer {
    fn database(&self) -> Arc<dyn DatabaseService> {
        current(&self.database)
    }

    /// Same readiness rules as the production container, applied to
    /// whatever database double is installed.
    async fn journal_repository(&self) -> ContainerResult<Arc<dyn JournalRepository>> {
        let db = self.database();
        match db.status() {
            DbStatus::Ready => {}
            DbStatus::NotReady => {
                db.setup_database()
                    .await
                    .map_err(|e| ContainerError::database_unavailable(e.to_string()))?;
            }
            DbStatus::Failed(reason) => {
                return Err(ContainerError::database_unavailable(reason));
            }
        }
        Ok(current(&self.journal))
    }

    fn toasts(&self) -> Arc<dyn ToastService> {
        current(&self.toasts)
    }

    fn navigation(&self) -> Arc<dyn NavigationService> {
        current(&self.navigation)
    }

    fn theme(&self) -> Arc<dyn ThemeService> {
        current(&self.theme)
    }

    fn tutorials(&self) -> Arc<dyn TutorialService> {
        current(&self.tutorials)
    }

    fn metrics(&self) -> Arc<dyn MetricRegistry> {
        current(&self.metrics)
    }

    fn time_period(&self) -> Arc<dyn TimePeriodService> {
        current(&self.time_period)
    }

    fn onboarding(&self) -> Arc<dyn OnboardingService> {
        current(&self.onboarding)
    }
}
