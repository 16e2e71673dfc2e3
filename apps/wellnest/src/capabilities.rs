//! # Capabilities
//!
//! One trait per service the container hands out. Screens depend on these
//! traits, never on the concrete managers, so the mock container can swap
//! any of them.
//!
//! ```text
//! ┌────────────────────┬──────────────────────────┬─────────────────────────┐
//! │ Capability         │ Production               │ Default fake            │
//! ├────────────────────┼──────────────────────────┼─────────────────────────┤
//! │ DatabaseService    │ DatabaseManager          │ StubDatabase            │
//! │ JournalRepository  │ SqliteJournalRepository  │ InMemoryJournalRepo     │
//! │ ToastService       │ ToastCenter              │ RecordingToasts         │
//! │ NavigationService  │ NavigationStack          │ (production)            │
//! │ ThemeService       │ ThemeManager             │ (production, in memory) │
//! │ TutorialService    │ TutorialManager          │ (production, in memory) │
//! │ MetricRegistry     │ MetricCatalog            │ (production)            │
//! │ TimePeriodService  │ TimePeriodManager        │ (production, in memory) │
//! │ OnboardingService  │ OnboardingManager        │ (production, in memory) │
//! └────────────────────┴──────────────────────────┴─────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wellnest_core::{
    DateRange, MetricDefinition, SettingsResult, StepOutcome, TimePeriod, Tutorial,
    TutorialResult, TutorialSession, TutorialStep, ValidationError,
};

pub use wellnest_db::{DatabaseService, JournalRepository};

// =============================================================================
// Toasts
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastStyle {
    Info,
    Success,
    Error,
}

/// A transient message shown over the current screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub style: ToastStyle,
}

impl Toast {
    pub fn new(message: impl Into<String>, style: ToastStyle) -> Self {
        Toast {
            message: message.into(),
            style,
        }
    }
}

/// At most one toast is visible; showing a new one replaces the old.
pub trait ToastService: Send + Sync {
    fn show(&self, toast: Toast);
    fn dismiss(&self);
    fn current(&self) -> Option<Toast>;
}

// =============================================================================
// Navigation
// =============================================================================

/// A screen that can be pushed onto the navigation stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "screen")]
pub enum Route {
    Journal,
    EntryDetail { entry_id: String },
    NewEntry { day: NaiveDate },
    Insights,
    Settings,
    Tutorial { tutorial_id: String },
}

/// Stack of routes above the root screen.
pub trait NavigationService: Send + Sync {
    fn push(&self, route: Route);

    /// Pops the top route. Returns `None` at the root.
    fn pop(&self) -> Option<Route>;

    fn pop_to_root(&self);

    /// Routes from bottom to top.
    fn path(&self) -> Vec<Route>;
}

// =============================================================================
// Theme
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Follow the OS appearance.
    #[default]
    System,
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Theme::System => "system",
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        f.write_str(name)
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Theme::System),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

pub trait ThemeService: Send + Sync {
    fn theme(&self) -> Theme;

    /// Changes and persists the appearance.
    fn set_theme(&self, theme: Theme) -> SettingsResult<()>;
}

// =============================================================================
// Tutorials
// =============================================================================

/// Tutorial catalog plus the shared tutorial state machine.
pub trait TutorialService: Send + Sync {
    fn catalog(&self) -> Vec<Arc<Tutorial>>;
    fn tutorial(&self, id: &str) -> Option<Arc<Tutorial>>;

    /// Snapshot of the current session.
    fn session(&self) -> TutorialSession;

    /// The step being displayed, if a tutorial is open.
    fn current_step(&self) -> Option<TutorialStep>;

    fn is_completed(&self, tutorial_id: &str) -> TutorialResult<bool>;
    fn start_tutorial(&self, tutorial: Arc<Tutorial>) -> TutorialResult<()>;
    fn reset_tutorial(&self, tutorial: &Tutorial) -> TutorialResult<()>;
    fn next_step(&self) -> TutorialResult<StepOutcome>;
    fn complete(&self) -> TutorialResult<String>;
}

// =============================================================================
// Metrics
// =============================================================================

pub trait MetricRegistry: Send + Sync {
    fn all(&self) -> Vec<MetricDefinition>;
    fn get(&self, id: &str) -> Option<MetricDefinition>;

    /// Adds a metric. Rejects invalid or already-registered ids.
    fn register(&self, metric: MetricDefinition) -> Result<(), ValidationError>;
}

// =============================================================================
// Time Period
// =============================================================================

pub trait TimePeriodService: Send + Sync {
    fn selected(&self) -> TimePeriod;

    /// Changes and persists the selection.
    fn select(&self, period: TimePeriod) -> SettingsResult<()>;

    /// Range of the selected period ending on `today`.
    fn current_range(&self, today: NaiveDate) -> DateRange {
        self.selected().range_ending(today)
    }
}

// =============================================================================
// Onboarding
// =============================================================================

/// First-launch flag.
pub trait OnboardingService: Send + Sync {
    fn has_completed(&self) -> SettingsResult<bool>;
    fn complete(&self) -> SettingsResult<()>;
    fn reset(&self) -> SettingsResult<()>;
}
