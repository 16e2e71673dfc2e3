//! # Tutorial Manager
//!
//! Owns the single [`TutorialMachine`] and the catalog of tutorials the app
//! ships. Every transition goes through one mutex, so two screens racing to
//! start a tutorial see `AlreadyActive` rather than a torn session.
//!
//! ```text
//! ┌───────────────┐  start_tutorial   ┌─────────────────────┐
//! │     Idle      │ ────────────────► │ Active(t, step = 0) │ ◄─┐
//! └───────────────┘                   └─────────────────────┘   │ next_step
//!         ▲                                 │        │          │ (step+1 < len)
//!         │        complete / last next_step│        └──────────┘
//!         └─────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use wellnest_core::{
    SettingsStore, StepOutcome, Tutorial, TutorialMachine, TutorialResult, TutorialSession,
    TutorialStep,
};

use crate::capabilities::TutorialService;

pub const JOURNAL_BASICS: &str = "journal-basics";
pub const INSIGHTS_TOUR: &str = "insights-tour";

/// The tutorials bundled with the app.
pub fn builtin_tutorials() -> Vec<Arc<Tutorial>> {
    vec![
        Arc::new(Tutorial::new(
            JOURNAL_BASICS,
            vec![
                TutorialStep::new(
                    "log-mood",
                    "face.smiling",
                    "Log how you feel",
                    "Tap a face to record today's mood.",
                ),
                TutorialStep::new(
                    "add-note",
                    "square.and.pencil",
                    "Add a note",
                    "Write a few words about what happened.",
                )
                .with_subtitle("Notes are optional"),
                TutorialStep::new(
                    "browse",
                    "calendar",
                    "Look back",
                    "Past days live in the journal list.",
                ),
            ],
        )),
        Arc::new(Tutorial::new(
            INSIGHTS_TOUR,
            vec![
                TutorialStep::new(
                    "pick-period",
                    "calendar.badge.clock",
                    "Pick a period",
                    "Switch between week, month and year.",
                ),
                TutorialStep::new(
                    "read-chart",
                    "chart.xyaxis.line",
                    "Spot patterns",
                    "Each point is one day's average mood.",
                ),
            ],
        )),
    ]
}

#[derive(Debug)]
pub struct TutorialManager {
    catalog: Vec<Arc<Tutorial>>,
    machine: Mutex<TutorialMachine>,
}

impl TutorialManager {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self::with_catalog(settings, builtin_tutorials())
    }

    pub fn with_catalog(settings: Arc<dyn SettingsStore>, catalog: Vec<Arc<Tutorial>>) -> Self {
        TutorialManager {
            catalog,
            machine: Mutex::new(TutorialMachine::new(settings)),
        }
    }

    fn with_machine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TutorialMachine) -> R,
    {
        let mut machine = self.machine.lock().expect("Tutorial mutex poisoned");
        f(&mut machine)
    }
}

impl TutorialService for TutorialManager {
    fn catalog(&self) -> Vec<Arc<Tutorial>> {
        self.catalog.clone()
    }

    fn tutorial(&self, id: &str) -> Option<Arc<Tutorial>> {
        self.catalog.iter().find(|t| t.id() == id).cloned()
    }

    fn session(&self) -> TutorialSession {
        self.with_machine(|m| m.session().clone())
    }

    fn current_step(&self) -> Option<TutorialStep> {
        self.with_machine(|m| m.session().displayed_step().cloned())
    }

    fn is_completed(&self, tutorial_id: &str) -> TutorialResult<bool> {
        self.with_machine(|m| m.is_completed(tutorial_id))
    }

    fn start_tutorial(&self, tutorial: Arc<Tutorial>) -> TutorialResult<()> {
        self.with_machine(|m| m.start_tutorial(tutorial))
    }

    fn reset_tutorial(&self, tutorial: &Tutorial) -> TutorialResult<()> {
        self.with_machine(|m| m.reset_tutorial(tutorial))
    }

    fn next_step(&self) -> TutorialResult<StepOutcome> {
        self.with_machine(|m| m.next_step())
    }

    fn complete(&self) -> TutorialResult<String> {
        self.with_machine(|m| m.complete())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use wellnest_core::{MemorySettingsStore, TutorialError};

    fn manager() -> TutorialManager {
        TutorialManager::new(Arc::new(MemorySettingsStore::new()))
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let manager = manager();
        let catalog = manager.catalog();
        assert_eq!(catalog.len(), 2);
        assert!(manager.tutorial(JOURNAL_BASICS).is_some());
        assert!(manager.tutorial("missing").is_none());
        assert_ne!(catalog[0].id(), catalog[1].id());
    }

    #[test]
    fn test_walkthrough() {
        let manager = manager();
        let basics = manager.tutorial(JOURNAL_BASICS).unwrap();

        manager.start_tutorial(basics.clone()).unwrap();
        assert_eq!(manager.current_step().unwrap().id, "log-mood");

        assert_eq!(manager.next_step().unwrap(), StepOutcome::Advanced { step: 1 });
        assert_eq!(manager.next_step().unwrap(), StepOutcome::Advanced { step: 2 });
        assert_eq!(
            manager.next_step().unwrap(),
            StepOutcome::Completed {
                tutorial_id: JOURNAL_BASICS.to_string()
            }
        );

        assert!(!manager.session().is_open());
        assert!(manager.current_step().is_none());
        assert!(manager.is_completed(JOURNAL_BASICS).unwrap());
        assert_eq!(
            manager.start_tutorial(basics.clone()),
            Err(TutorialError::AlreadyCompleted(JOURNAL_BASICS.to_string()))
        );

        manager.reset_tutorial(&basics).unwrap();
        manager.start_tutorial(basics).unwrap();
        assert_eq!(manager.session().current_step(), 0);
    }

    #[test]
    fn test_concurrent_starts_admit_one() {
        let manager = Arc::new(manager());
        let tour = manager.tutorial(INSIGHTS_TOUR).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let manager = Arc::clone(&manager);
                let tour = Arc::clone(&tour);
                thread::spawn(move || manager.start_tutorial(tour).is_ok())
            })
            .collect();

        let started = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(started, 1);
    }
}
