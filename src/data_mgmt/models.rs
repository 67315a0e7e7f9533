use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Metric name (e.g. `Temperature`) to numeric value.
pub type Metrics = BTreeMap<String, f64>;

/// Current value of every monitored metric found in a reading.
pub type MetricSet = BTreeMap<MetricKey, f64>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModuleReading {
    pub module_name: String,
    pub metrics: Metrics,
}

impl ModuleReading {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            metrics: Metrics::new(),
        }
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }
}

/// One polling cycle's snapshot: the main device plus its attached modules.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StationReading {
    pub device: ModuleReading,
    pub modules: Vec<ModuleReading>,
}

impl StationReading {
    pub fn module(&self, module_name: &str) -> Option<&ModuleReading> {
        self.modules.iter().find(|m| m.module_name == module_name)
    }

    pub fn value_of(&self, key: &MetricKey) -> Option<f64> {
        match key {
            MetricKey::Station(metric) => self.device.metrics.get(metric).copied(),
            MetricKey::Module { module, metric } => self
                .module(module)
                .and_then(|m| m.metrics.get(metric).copied()),
        }
    }

    /// Picks the current values of the given metrics, skipping any the reading lacks.
    pub fn select(&self, monitored: &[MetricKey]) -> MetricSet {
        monitored
            .iter()
            .filter_map(|key| self.value_of(key).map(|value| (key.clone(), value)))
            .collect()
    }
}

/// Identifies a metric either on the main device or on a named module.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricKey {
    Station(String),
    Module { module: String, metric: String },
}

impl MetricKey {
    pub fn station(metric: impl Into<String>) -> Self {
        MetricKey::Station(metric.into())
    }

    pub fn module(module: impl Into<String>, metric: impl Into<String>) -> Self {
        MetricKey::Module {
            module: module.into(),
            metric: metric.into(),
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKey::Station(metric) => write!(f, "{metric}"),
            MetricKey::Module { module, metric } => write!(f, "{module}/{metric}"),
        }
    }
}
