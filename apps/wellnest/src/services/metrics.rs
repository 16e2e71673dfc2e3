//! Registry of trackable metrics.

use std::sync::RwLock;

use tracing::info;
use wellnest_core::validation::validate_identifier;
use wellnest_core::{builtin_metrics, MetricDefinition, ValidationError};

use crate::capabilities::MetricRegistry;

/// Metric definitions in registration order, starting with the built-ins.
#[derive(Debug)]
pub struct MetricCatalog {
    metrics: RwLock<Vec<MetricDefinition>>,
}

impl MetricCatalog {
    pub fn new() -> Self {
        Self::with_metrics(builtin_metrics())
    }

    pub fn with_metrics(metrics: Vec<MetricDefinition>) -> Self {
        MetricCatalog {
            metrics: RwLock::new(metrics),
        }
    }
}

impl Default for MetricCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricRegistry for MetricCatalog {
    fn all(&self) -> Vec<MetricDefinition> {
        self.metrics.read().expect("Metrics lock poisoned").clone()
    }

    fn get(&self, id: &str) -> Option<MetricDefinition> {
        self.metrics
            .read()
            .expect("Metrics lock poisoned")
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    fn register(&self, metric: MetricDefinition) -> Result<(), ValidationError> {
        validate_identifier("metric id", &metric.id)?;
        if metric.name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "metric name".to_string(),
            });
        }

        let mut metrics = self.metrics.write().expect("Metrics lock poisoned");
        if metrics.iter().any(|m| m.id == metric.id) {
            return Err(ValidationError::Duplicate {
                field: "metric id".to_string(),
                value: metric.id,
            });
        }

        info!(metric = %metric.id, "Metric registered");
        metrics.push(metric);
        Ok(())
    }
}
