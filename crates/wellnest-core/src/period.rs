//! # Time Periods
//!
//! The window the insights screens summarize over.
//!
//! ```text
//! today = 2026-03-14
//!
//!   Week   2026-03-08 ──────────────► 2026-03-14   (7 days)
//!   Month  2026-02-15 ──────────────► 2026-03-14   (one calendar month)
//!   Year   2025-03-15 ──────────────► 2026-03-14   (one calendar year)
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Selectable summary window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    #[default]
    Week,
    Month,
    Year,
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of days in the range, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 3] = [TimePeriod::Week, TimePeriod::Month, TimePeriod::Year];

    /// The inclusive range of this period that ends on `today`.
    pub fn range_ending(&self, today: NaiveDate) -> DateRange {
        let before = match self {
            TimePeriod::Week => today.checked_sub_days(Days::new(7)),
            TimePeriod::Month => today.checked_sub_months(Months::new(1)),
            TimePeriod::Year => today.checked_sub_months(Months::new(12)),
        };
        let start = before
            .and_then(|d| d.succ_opt())
            .unwrap_or(NaiveDate::MIN);
        DateRange { start, end: today }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimePeriod::Week => write!(f, "week"),
            TimePeriod::Month => write!(f, "month"),
            TimePeriod::Year => write!(f, "year"),
        }
    }
}

impl FromStr for TimePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" => Ok(TimePeriod::Week),
            "month" => Ok(TimePeriod::Month),
            "year" => Ok(TimePeriod::Year),
            other => Err(format!(
                "Unknown time period: '{}'. Valid options: week, month, year",
                other
            )),
        }
    }
}
