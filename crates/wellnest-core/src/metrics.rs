//! # Metric Definitions
//!
//! Describes the quantities a user can track. The registry service in the
//! app crate owns the live set; this module only defines the shapes and the
//! built-in catalog.

use serde::{Deserialize, Serialize};

/// How a metric's values are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum MetricKind {
    /// Integer score between `min` and `max` inclusive.
    Scale { min: i64, max: i64 },

    /// Duration in minutes.
    Duration,

    /// Non-negative count (e.g. glasses of water).
    Count,
}

/// A trackable metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDefinition {
    /// Stable identifier, e.g. `"sleep"`.
    pub id: String,

    /// Display name.
    pub name: String,

    pub kind: MetricKind,

    /// Icon reference understood by the view layer.
    pub icon: String,
}

impl MetricDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: MetricKind,
        icon: impl Into<String>,
    ) -> Self {
        MetricDefinition {
            id: id.into(),
            name: name.into(),
            kind,
            icon: icon.into(),
        }
    }

    /// Whether `value` is acceptable for this metric.
    pub fn accepts(&self, value: i64) -> bool {
        match self.kind {
            MetricKind::Scale { min, max } => (min..=max).contains(&value),
            MetricKind::Duration | MetricKind::Count => value >= 0,
        }
    }
}

/// The metrics every installation starts with.
pub fn builtin_metrics() -> Vec<MetricDefinition> {
    vec![
        MetricDefinition::new(
            "mood",
            "Mood",
            MetricKind::Scale {
                min: crate::MOOD_MIN,
                max: crate::MOOD_MAX,
            },
            "face.smiling",
        ),
        MetricDefinition::new("energy", "Energy", MetricKind::Scale { min: 1, max: 5 }, "bolt"),
        MetricDefinition::new("sleep", "Sleep", MetricKind::Duration, "bed.double"),
        MetricDefinition::new("anxiety", "Anxiety", MetricKind::Scale { min: 0, max: 10 }, "waveform.path"),
        MetricDefinition::new("pain", "Pain", MetricKind::Scale { min: 0, max: 10 }, "bandage"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_ids_are_unique() {
        let metrics = builtin_metrics();
        let ids: HashSet<_> = metrics.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), metrics.len());
    }

    #[test]
    fn test_accepts() {
        let metrics = builtin_metrics();
        let mood = metrics.iter().find(|m| m.id == "mood").unwrap();
        assert!(mood.accepts(3));
        assert!(!mood.accepts(6));

        let sleep = metrics.iter().find(|m| m.id == "sleep").unwrap();
        assert!(sleep.accepts(480));
        assert!(!sleep.accepts(-1));
    }
}
