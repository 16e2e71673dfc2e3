//! # Tutorial State Machine
//!
//! Walks a user through a tutorial's ordered steps and remembers which
//! tutorials were completed.
//!
//! ## States & Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Tutorial Session Lifecycle                           │
//! │                                                                         │
//! │                start_tutorial(T)                                        │
//! │   ┌──────┐  ─────────────────────►  ┌──────────────────┐               │
//! │   │ Idle │                          │  Active(T, 0)    │               │
//! │   └──────┘  ◄─────────────────────  └────────┬─────────┘               │
//! │      ▲          complete()                   │ next_step()              │
//! │      │                                       ▼                          │
//! │      │                              ┌──────────────────┐               │
//! │      │                              │  Active(T, k)    │ k < N-1       │
//! │      │                              └────────┬─────────┘               │
//! │      │        next_step() on k = N-1         │                          │
//! │      └───────────────────────────────────────┘                          │
//! │                                                                         │
//! │  reset_tutorial(T): clears T's completion flag;                         │
//! │                     Active(T, k) → Active(T, 0)                         │
//! │                     Active(U, k) → Conflict (no change)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `current_step < steps.len()` while the session is open
//! - a closed session displays no step
//! - no current tutorial implies the session is closed
//!
//! The machine itself is not synchronized. Owners that share it across
//! threads wrap it in a mutex so that one transition runs at a time.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{TutorialError, TutorialResult};
use crate::settings::{tutorial_completion_key, SettingsStore};

// =============================================================================
// Tutorial Definition
// =============================================================================

/// One screen of a tutorial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialStep {
    /// Stable identifier, unique within its tutorial.
    pub id: String,

    /// Icon reference understood by the view layer (e.g. an SF Symbol name).
    pub icon: String,

    pub title: String,

    pub description: String,

    pub subtitle: Option<String>,
}

impl TutorialStep {
    /// Creates a step without a subtitle.
    pub fn new(
        id: impl Into<String>,
        icon: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        TutorialStep {
            id: id.into(),
            icon: icon.into(),
            title: title.into(),
            description: description.into(),
            subtitle: None,
        }
    }

    /// Adds a subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}

/// A named, ordered, immutable sequence of steps.
///
/// Fields are private so a tutorial cannot change after it is defined;
/// share it as `Arc<Tutorial>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tutorial {
    id: String,
    steps: Vec<TutorialStep>,
}

impl Tutorial {
    pub fn new(id: impl Into<String>, steps: Vec<TutorialStep>) -> Self {
        Tutorial {
            id: id.into(),
            steps,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn steps(&self) -> &[TutorialStep] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&TutorialStep> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

// =============================================================================
// Session State
// =============================================================================

/// Snapshot of what the tutorial overlay is showing.
#[derive(Debug, Clone, Default)]
pub struct TutorialSession {
    current_tutorial: Option<Arc<Tutorial>>,
    open: bool,
    current_step: usize,
}

impl TutorialSession {
    /// The idle session: nothing open, step 0.
    pub fn idle() -> Self {
        Self::default()
    }

    fn active(tutorial: Arc<Tutorial>) -> Self {
        TutorialSession {
            current_tutorial: Some(tutorial),
            open: true,
            current_step: 0,
        }
    }

    pub fn current_tutorial(&self) -> Option<&Arc<Tutorial>> {
        self.current_tutorial.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// The step being displayed, if any.
    pub fn displayed_step(&self) -> Option<&TutorialStep> {
        if !self.open {
            return None;
        }
        self.current_tutorial
            .as_ref()
            .and_then(|t| t.step(self.current_step))
    }

    fn active_id(&self) -> Option<&str> {
        self.current_tutorial.as_deref().map(Tutorial::id)
    }
}

/// Result of a successful [`TutorialMachine::next_step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved to `step`.
    Advanced { step: usize },

    /// The last step was passed; the tutorial is now completed and idle.
    Completed { tutorial_id: String },
}

// =============================================================================
// Machine
// =============================================================================

/// The tutorial state machine.
///
/// Completion flags are read from and written to the settings store; the
/// session itself is in-memory only.
#[derive(Debug)]
pub struct TutorialMachine {
    session: TutorialSession,
    settings: Arc<dyn SettingsStore>,
}

impl TutorialMachine {
    /// Creates an idle machine backed by `settings`.
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        TutorialMachine {
            session: TutorialSession::idle(),
            settings,
        }
    }

    pub fn session(&self) -> &TutorialSession {
        &self.session
    }

    /// Whether the persisted completion flag is set for `tutorial_id`.
    pub fn is_completed(&self, tutorial_id: &str) -> TutorialResult<bool> {
        Ok(self
            .settings
            .get_bool(&tutorial_completion_key(tutorial_id))?)
    }

    /// `Idle → Active(tutorial, 0)`.
    ///
    /// ## Errors
    /// - `AlreadyCompleted` if the tutorial's flag is set
    /// - `AlreadyActive` if any tutorial is open
    /// - `Empty` if the tutorial has no steps
    pub fn start_tutorial(&mut self, tutorial: Arc<Tutorial>) -> TutorialResult<()> {
        if self.is_completed(tutorial.id())? {
            return Err(TutorialError::AlreadyCompleted(tutorial.id().to_string()));
        }

        if let Some(active) = self.session.active_id() {
            return Err(TutorialError::AlreadyActive {
                active: active.to_string(),
            });
        }

        if tutorial.is_empty() {
            return Err(TutorialError::Empty(tutorial.id().to_string()));
        }

        info!(tutorial = %tutorial.id(), steps = tutorial.len(), "Tutorial started");
        self.session = TutorialSession::active(tutorial);
        Ok(())
    }

    /// Clears the completion flag and rewinds the tutorial if it is open.
    ///
    /// When a different tutorial is open this returns `Conflict` and neither
    /// the session nor the flag is touched.
    pub fn reset_tutorial(&mut self, tutorial: &Tutorial) -> TutorialResult<()> {
        if let Some(active) = self.session.active_id() {
            if active != tutorial.id() {
                return Err(TutorialError::Conflict {
                    active: active.to_string(),
                    requested: tutorial.id().to_string(),
                });
            }
        }

        self.settings.remove(&tutorial_completion_key(tutorial.id()))?;

        if self.session.active_id() == Some(tutorial.id()) {
            self.session.open = true;
            self.session.current_step = 0;
        }

        info!(tutorial = %tutorial.id(), "Tutorial reset");
        Ok(())
    }

    /// Advances one step, completing the tutorial after its last step.
    pub fn next_step(&mut self) -> TutorialResult<StepOutcome> {
        let len = match self.session.current_tutorial.as_deref() {
            Some(tutorial) if self.session.open => tutorial.len(),
            _ => return Err(TutorialError::NotActive),
        };

        let next = self.session.current_step + 1;
        if next < len {
            self.session.current_step = next;
            debug!(step = next, of = len, "Tutorial advanced");
            return Ok(StepOutcome::Advanced { step: next });
        }

        let tutorial_id = self.complete()?;
        Ok(StepOutcome::Completed { tutorial_id })
    }

    /// Persists completion for the open tutorial and returns to idle.
    ///
    /// If the flag cannot be written the session is left as it was.
    /// Returns the completed tutorial's id.
    pub fn complete(&mut self) -> TutorialResult<String> {
        let tutorial_id = self
            .session
            .active_id()
            .ok_or(TutorialError::NotActive)?
            .to_string();

        self.settings
            .set_bool(&tutorial_completion_key(&tutorial_id), true)?;

        self.session = TutorialSession::idle();
        info!(tutorial = %tutorial_id, "Tutorial completed");
        Ok(tutorial_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
