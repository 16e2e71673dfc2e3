//! # wellnest-core: Pure Domain Logic for Wellnest
//!
//! Types and state machines shared by every other crate in the workspace.
//! Nothing here touches the disk, the network, or a database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Wellnest Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Mobile shell (views, onboarding UI)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ capability traits                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             apps/wellnest (ServiceContainer, Environment)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ wellnest-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ tutorial  │  │ settings  │  │   types   │  │  metrics  │  │   │
//! │  │   │  Machine  │  │   Store   │  │  Journal  │  │  period   │  │   │
//! │  │   │  Session  │  │  (trait)  │  │   Entry   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 wellnest-db (Database Layer)                    │   │
//! │  │        SQLite pool, migrations, transactions, repositories      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`tutorial`] - Tutorial definitions and the step-walking state machine
//! - [`settings`] - Key-value settings contract plus an in-memory store
//! - [`types`] - Journal entry types
//! - [`metrics`] - Metric definitions
//! - [`period`] - Time-period selection and date ranges
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod metrics;
pub mod period;
pub mod settings;
pub mod tutorial;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{SettingsError, SettingsResult, TutorialError, TutorialResult, ValidationError};
pub use metrics::{builtin_metrics, MetricDefinition, MetricKind};
pub use period::{DateRange, TimePeriod};
pub use settings::{MemorySettingsStore, SettingsStore};
pub use tutorial::{StepOutcome, Tutorial, TutorialMachine, TutorialSession, TutorialStep};
pub use types::{JournalEntry, NewJournalEntry};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Lowest mood score a journal entry may carry.
pub const MOOD_MIN: i64 = 1;

/// Highest mood score a journal entry may carry.
pub const MOOD_MAX: i64 = 5;

/// Longest free-text note accepted on an entry, in characters.
pub const MAX_NOTE_LENGTH: usize = 2_000;
