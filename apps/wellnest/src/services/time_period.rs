//! Insights time-period selection, persisted in settings.

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};
use wellnest_core::settings::TIME_PERIOD_KEY;
use wellnest_core::{SettingsResult, SettingsStore, TimePeriod};

use crate::capabilities::TimePeriodService;

#[derive(Debug)]
pub struct TimePeriodManager {
    settings: Arc<dyn SettingsStore>,
    selected: RwLock<TimePeriod>,
}

impl TimePeriodManager {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        let selected = match settings.get(TIME_PERIOD_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring stored time period");
                TimePeriod::default()
            }),
            Ok(None) => TimePeriod::default(),
            Err(e) => {
                warn!(error = %e, "Could not read stored time period");
                TimePeriod::default()
            }
        };

        TimePeriodManager {
            settings,
            selected: RwLock::new(selected),
        }
    }
}

impl TimePeriodService for TimePeriodManager {
    fn selected(&self) -> TimePeriod {
        *self.selected.read().expect("Time period lock poisoned")
    }

    fn select(&self, period: TimePeriod) -> SettingsResult<()> {
        let mut selected = self.selected.write().expect("Time period lock poisoned");
        self.settings.set(TIME_PERIOD_KEY, &period.to_string())?;
        *selected = period;
        debug!(%period, "Time period selected");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wellnest_core::MemorySettingsStore;

    #[test]
    fn test_select_changes_range() {
        let settings = Arc::new(MemorySettingsStore::new());
        let periods = TimePeriodManager::new(settings.clone());
        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();

        assert_eq!(periods.selected(), TimePeriod::Week);
        assert_eq!(periods.current_range(today).days(), 7);

        periods.select(TimePeriod::Year).unwrap();
        assert_eq!(
            periods.current_range(today).start,
            NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
        );
        assert_eq!(TimePeriodManager::new(settings).selected(), TimePeriod::Year);
    }
}
