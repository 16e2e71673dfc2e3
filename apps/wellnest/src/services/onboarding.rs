//! First-launch flag.

use std::sync::Arc;

use tracing::info;
use wellnest_core::settings::ONBOARDING_COMPLETED_KEY;
use wellnest_core::{SettingsResult, SettingsStore};

use crate::capabilities::OnboardingService;

#[derive(Debug)]
pub struct OnboardingManager {
    settings: Arc<dyn SettingsStore>,
}

impl OnboardingManager {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        OnboardingManager { settings }
    }
}

impl OnboardingService for OnboardingManager {
    fn has_completed(&self) -> SettingsResult<bool> {
        self.settings.get_bool(ONBOARDING_COMPLETED_KEY)
    }

    fn complete(&self) -> SettingsResult<()> {
        self.settings.set_bool(ONBOARDING_COMPLETED_KEY, true)?;
        info!("Onboarding completed");
        Ok(())
    }

    fn reset(&self) -> SettingsResult<()> {
        self.settings.remove(ONBOARDING_COMPLETED_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellnest_core::MemorySettingsStore;

    #[test]
    fn test_flag_lifecycle() {
        let onboarding = OnboardingManager::new(Arc::new(MemorySettingsStore::new()));
        assert!(!onboarding.has_completed().unwrap());

        onboarding.complete().unwrap();
        assert!(onboarding.has_completed().unwrap());

        onboarding.reset().unwrap();
        assert!(!onboarding.has_completed().unwrap());
    }
}
