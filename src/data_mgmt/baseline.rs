use std::collections::HashMap;

use super::models::{MetricKey, MetricSet};

/// Last successfully published value of each monitored metric.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Baseline {
    values: HashMap<MetricKey, f64>,
}

impl Baseline {
    pub fn get(&self, key: &MetricKey) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Metrics whose current value differs from the baseline.
    /// A metric never published before always counts as changed.
    pub fn changed<'a>(&self, current: &'a MetricSet) -> Vec<&'a MetricKey> {
        current
            .iter()
            .filter(|(key, value)| self.get(key) != Some(**value))
            .map(|(key, _)| key)
            .collect()
    }

    pub fn advance(&mut self, published: &MetricSet) {
        for (key, value) in published {
            self.values.insert(key.clone(), *value);
        }
    }
}
