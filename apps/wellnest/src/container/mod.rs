//! # Service Container
//!
//! The single access path to the app's long-lived services.
//!
//! ## Lifetimes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Singleton Construction                               │
//! │                                                                         │
//! │  first toasts()  ──► OnceLock::get_or_init ──► Arc<ToastCenter>        │
//! │  next  toasts()  ──► same Arc                                          │
//! │                                                                         │
//! │  first journal_repository().await                                      │
//! │     │                                                                   │
//! │     ├── status Ready     ──► build repository once, return it          │
//! │     ├── status NotReady  ──► setup_database().await, then as Ready     │
//! │     └── status Failed    ──► Err(DatabaseUnavailable), no retry        │
//! │                                                                         │
//! │  Recovery is explicit: database().setup_database() or                  │
//! │  database().reset_database(), then ask for the repository again.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Variants
//! - [`AppContainer`]: production wiring over SQLite and the settings file
//! - [`MockContainer`]: fakes by default, any capability replaceable at
//!   construction or later through a setter

use std::sync::Arc;

use async_trait::async_trait;

use crate::capabilities::{
    DatabaseService, JournalRepository, MetricRegistry, NavigationService, OnboardingService,
    ThemeService, TimePeriodService, ToastService, TutorialService,
};
use crate::error::ContainerResult;

mod app;
pub mod fakes;
mod mock;

pub use app::AppContainer;
pub use mock::{MockContainer, MockOverrides};

/// One accessor per capability. Repeated calls return the same `Arc`.
#[async_trait]
pub trait ServiceContainer: Send + Sync {
    fn database(&self) -> Arc<dyn DatabaseService>;

    /// The journal repository, available once the database is Ready.
    async fn journal_repository(&self) -> ContainerResult<Arc<dyn JournalRepository>>;

    fn toasts(&self) -> Arc<dyn ToastService>;
    fn navigation(&self) -> Arc<dyn NavigationService>;
    fn theme(&self) -> Arc<dyn ThemeService>;
    fn tutorials(&self) -> Arc<dyn TutorialService>;
    fn metrics(&self) -> Arc<dyn MetricRegistry>;
    fn time_period(&self) -> Arc<dyn TimePeriodService>;
    fn onboarding(&self) -> Arc<dyn OnboardingService>;
}
