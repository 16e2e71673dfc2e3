//! # File Settings Store
//!
//! `SettingsStore` backed by a small JSON object in the data directory.
//!
//! ```text
//! set("appearance.theme", "dark")
//!   │
//!   ├─ clone map, apply change
//!   ├─ write settings.json.tmp
//!   ├─ rename over settings.json      (atomic on the same filesystem)
//!   └─ swap the in-memory map         (only after the rename succeeded)
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, warn};
use wellnest_core::{SettingsError, SettingsResult, SettingsStore};

/// Settings persisted as a JSON object of string values.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl FileSettingsStore {
    /// Opens the store at `path`. A missing file reads as empty; an
    /// unreadable or malformed one is an error.
    pub fn open(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| SettingsError::Corrupt(format!("{}: {}", path.display(), e)))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No settings file yet");
                BTreeMap::new()
            }
            Err(e) => return Err(io_error(&path, e)),
        };

        Ok(FileSettingsStore {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy of the map, persists it, then publishes it.
    fn update(&self, change: impl FnOnce(&mut BTreeMap<String, String>)) -> SettingsResult<()> {
        let mut values = self.values.write().map_err(|_| SettingsError::Poisoned)?;
        let mut next = values.clone();
        change(&mut next);
        if next == *values {
            return Ok(());
        }
        self.persist(&next)?;
        *values = next;
        Ok(())
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
            }
        }

        let json = serde_json::to_string_pretty(values)
            .map_err(|e| SettingsError::Io(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).map_err(|e| io_error(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            warn!(path = %self.path.display(), error = %e, "Failed to replace settings file");
            let _ = fs::remove_file(&tmp);
            return Err(io_error(&self.path, e));
        }
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> SettingsResult<Option<String>> {
        let values = self.values.read().map_err(|_| SettingsError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> SettingsResult<()> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> SettingsResult<()> {
        self.update(|values| {
            values.remove(key);
        })
    }
}

fn io_error(path: &Path, err: io::Error) -> SettingsError {
    SettingsError::Io(format!("{}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wellnest_core::settings::{ONBOARDING_COMPLETED_KEY, THEME_KEY};

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let store = FileSettingsStore::open(&path).unwrap();
        store.set(THEME_KEY, "dark").unwrap();
        store.set_bool(ONBOARDING_COMPLETED_KEY, true).unwrap();
        drop(store);

        let reopened = FileSettingsStore::open(&path).unwrap();
        assert_eq!(reopened.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert!(reopened.get_bool(ONBOARDING_COMPLETED_KEY).unwrap());
    }

    #[test]
    fn test_missing_file_reads_empty_and_is_not_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let store = FileSettingsStore::open(&path).unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
        store.remove(THEME_KEY).unwrap();
        assert!(!path.exists());

        store.set(THEME_KEY, "light").unwrap();
        assert!(path.exists());
        assert!(!dir.path().join("nested").join("settings.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();

        let err = FileSettingsStore::open(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Corrupt(_)));
    }

    #[test]
    fn test_failed_write_keeps_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = dir.path().join("settings.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        let store = FileSettingsStore {
            path: path.clone(),
            values: RwLock::new(BTreeMap::new()),
        };
        let err = store.set(THEME_KEY, "dark").unwrap_err();

        assert!(matches!(err, SettingsError::Io(_)));
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
    }
}
