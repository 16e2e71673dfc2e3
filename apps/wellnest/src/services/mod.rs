//! # Services
//!
//! Production implementations of the capability traits. Each service owns
//! its state behind a `std::sync` lock and exposes only the mutation methods
//! of its trait.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Service State                                        │
//! │                                                                         │
//! │  ToastCenter        Mutex<Option<Toast>>         memory only            │
//! │  NavigationStack    Mutex<Vec<Route>>            memory only            │
//! │  ThemeManager       RwLock<Theme>            ──► settings               │
//! │  TimePeriodManager  RwLock<TimePeriod>       ──► settings               │
//! │  OnboardingManager  (none)                   ──► settings               │
//! │  TutorialManager    Mutex<TutorialMachine>   ──► settings (flags)       │
//! │  MetricCatalog      RwLock<Vec<MetricDefinition>>  memory only          │
//! │                                                                         │
//! │  settings = Arc<dyn SettingsStore>: FileSettingsStore in production,    │
//! │             MemorySettingsStore in tests and previews                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod metrics;
mod navigation;
mod onboarding;
mod settings;
mod theme;
mod time_period;
mod toast;
mod tutorial;

pub use metrics::MetricCatalog;
pub use navigation::NavigationStack;
pub use onboarding::OnboardingManager;
pub use settings::FileSettingsStore;
pub use theme::ThemeManager;
pub use time_period::TimePeriodManager;
pub use toast::ToastCenter;
pub use tutorial::{builtin_tutorials, TutorialManager, INSIGHTS_TOUR, JOURNAL_BASICS};
