//! # Settings Store
//!
//! Key-value persistence contract for small app flags.
//!
//! ## What Lives Here
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Settings Keys                                     │
//! │                                                                         │
//! │  onboarding.completed           "true" / "false"                       │
//! │  tutorial.completed.<id>        "true" (absent = not completed)        │
//! │  appearance.theme               "system" / "light" / "dark"            │
//! │  insights.time_period           "week" / "month" / "year"              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The file-backed store lives in the app crate. This crate only ships the
//! in-memory store used by tests and previews.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::RwLock;

use crate::error::{SettingsError, SettingsResult};

/// Key for the first-launch / onboarding flag.
pub const ONBOARDING_COMPLETED_KEY: &str = "onboarding.completed";

/// Key for the persisted appearance.
pub const THEME_KEY: &str = "appearance.theme";

/// Key for the persisted insights time period.
pub const TIME_PERIOD_KEY: &str = "insights.time_period";

/// Returns the completion-flag key for a tutorial.
pub fn tutorial_completion_key(tutorial_id: &str) -> String {
    format!("tutorial.completed.{tutorial_id}")
}

/// Key-value settings persistence.
///
/// Implementations must be safe to share across threads. Writes are
/// durable once the call returns `Ok`.
pub trait SettingsStore: Send + Sync + Debug {
    /// Returns the raw value stored under `key`.
    fn get(&self, key: &str) -> SettingsResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> SettingsResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> SettingsResult<()>;

    /// Reads a boolean flag; absent keys read as `false`.
    fn get_bool(&self, key: &str) -> SettingsResult<bool> {
        Ok(self.get(key)?.as_deref() == Some("true"))
    }

    /// Writes a boolean flag.
    fn set_bool(&self, key: &str, value: bool) -> SettingsResult<()> {
        self.set(key, if value { "true" } else { "false" })
    }
}

/// In-memory settings store.
///
/// Deterministic and isolated: each instance starts empty unless built with
/// [`MemorySettingsStore::with_values`].
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemorySettingsStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given pairs.
    pub fn with_values<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MemorySettingsStore {
            values: RwLock::new(values),
        }
    }

    /// Returns a copy of everything currently stored.
    pub fn snapshot(&self) -> SettingsResult<BTreeMap<String, String>> {
        let values = self.values.read().map_err(|_| SettingsError::Poisoned)?;
        Ok(values.clone())
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> SettingsResult<Option<String>> {
        let values = self.values.read().map_err(|_| SettingsError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> SettingsResult<()> {
        let mut values = self.values.write().map_err(|_| SettingsError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> SettingsResult<()> {
        let mut values = self.values.write().map_err(|_| SettingsError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_flags_default_to_false() {
        let store = MemorySettingsStore::new();
        assert!(!store.get_bool(ONBOARDING_COMPLETED_KEY).unwrap());

        store.set_bool(ONBOARDING_COMPLETED_KEY, true).unwrap();
        assert!(store.get_bool(ONBOARDING_COMPLETED_KEY).unwrap());

        store.remove(ONBOARDING_COMPLETED_KEY).unwrap();
        assert!(!store.get_bool(ONBOARDING_COMPLETED_KEY).unwrap());
    }

    #[test]
    fn test_with_values() {
        let store = MemorySettingsStore::with_values([(THEME_KEY, "dark")]);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(store.snapshot().unwrap().len(), 1);
    }

    #[test]
    fn test_tutorial_completion_key() {
        assert_eq!(
            tutorial_completion_key("journal-basics"),
            "tutorial.completed.journal-basics"
        );
    }
}
