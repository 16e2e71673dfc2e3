//! Appearance selection, persisted in settings.

use std::sync::{Arc, RwLock};

use tracing::{info, warn};
use wellnest_core::settings::THEME_KEY;
use wellnest_core::{SettingsResult, SettingsStore};

use crate::capabilities::{Theme, ThemeService};

#[derive(Debug)]
pub struct ThemeManager {
    settings: Arc<dyn SettingsStore>,
    theme: RwLock<Theme>,
}

impl ThemeManager {
    /// Loads the persisted theme. Unknown or unreadable values fall back to
    /// `Theme::System`.
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        let theme = match settings.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring stored theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "Could not read stored theme");
                Theme::default()
            }
        };

        ThemeManager {
            settings,
            theme: RwLock::new(theme),
        }
    }
}

impl ThemeService for ThemeManager {
    fn theme(&self) -> Theme {
        *self.theme.read().expect("Theme lock poisoned")
    }

    fn set_theme(&self, theme: Theme) -> SettingsResult<()> {
        let mut current = self.theme.write().expect("Theme lock poisoned");
        self.settings.set(THEME_KEY, &theme.to_string())?;
        *current = theme;
        info!(%theme, "Theme changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellnest_core::MemorySettingsStore;

    #[test]
    fn test_theme_is_persisted() {
        let settings = Arc::new(MemorySettingsStore::new());
        let manager = ThemeManager::new(settings.clone());
        assert_eq!(manager.theme(), Theme::System);

        manager.set_theme(Theme::Dark).unwrap();
        assert_eq!(settings.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        let reloaded = ThemeManager::new(settings);
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn test_unknown_stored_theme_falls_back() {
        let settings = Arc::new(MemorySettingsStore::with_values([(THEME_KEY, "sepia")]));
        assert_eq!(ThemeManager::new(settings).theme(), Theme::System);
    }
}
