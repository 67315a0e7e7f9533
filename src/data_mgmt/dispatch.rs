use super::baseline::Baseline;
use super::models::{MetricKey, StationReading};
use super::publish::{PublishError, Publisher};

#[derive(Debug)]
pub enum DispatchOutcome {
    /// No monitored metric differs from the baseline.
    Unchanged,
    /// The full monitored set was handed to the publisher and accepted.
    Published { metrics: usize, changed: usize },
    /// The publisher rejected the update; the baseline was left as it was.
    Failed(PublishError),
}

/// Change-detection step run on every fetched reading.
///
/// Publishes all monitored values at once whenever at least one of them
/// differs from the last published value, and only advances the baseline
/// after the publisher accepted the update.
pub struct Dispatcher<P> {
    publisher: P,
    monitored: Vec<MetricKey>,
    baseline: Baseline,
}

impl<P: Publisher> Dispatcher<P> {
    pub fn new(publisher: P, monitored: Vec<MetricKey>) -> Self {
        if monitored.is_empty() {
            log::warn!("No metrics are mapped to the gateway; nothing will be published");
        }
        Self {
            publisher,
            monitored,
            baseline: Baseline::default(),
        }
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn monitored(&self) -> &[MetricKey] {
        &self.monitored
    }

    pub fn dispatch(&mut self, reading: &StationReading) -> DispatchOutcome {
        let current = reading.select(&self.monitored);
        let changed = self.baseline.changed(&current);

        if changed.is_empty() {
            log::debug!("No monitored value changed; skipping gateway update");
            return DispatchOutcome::Unchanged;
        }

        for key in &changed {
            log::info!(
                "{} changed: {:?} -> {}",
                key,
                self.baseline.get(key),
                current[*key]
            );
        }
        let changed = changed.len();

        match self.publisher.publish(&current) {
            Ok(()) => {
                self.baseline.advance(&current);
                DispatchOutcome::Published {
                    metrics: current.len(),
                    changed,
                }
            }
            Err(e) => {
                log::error!("Gateway update failed, will retry next cycle: {}", e);
                DispatchOutcome::Failed(e)
            }
        }
    }
}
