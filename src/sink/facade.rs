//! Bridge to the `metrics` crate facade.
//!
//! Whatever recorder the host installs (Prometheus exporter, statsd, ...)
//! receives one counter or histogram per activated view. The facade has no
//! notion of bucket layout, so distribution bounds are handed back through
//! [`MetricsFacade::histogram_buckets`] for the host to configure its exporter
//! with (e.g. `PrometheusBuilder::set_buckets_for_metric`).

use metrics::Label;
use parking_lot::RwLock;

use super::{Measurement, MetricsSink, Value};
use crate::registry::{Aggregation, Unit, View};

/// Forwards view observations to the global `metrics` recorder.
#[derive(Debug, Default)]
pub struct MetricsFacade {
    views: RwLock<Vec<View>>,
}

impl MetricsFacade {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(metric name, bounds)` for every active distribution view with
    /// explicit bounds, in activation order. Views with empty bounds use the
    /// exporter's default buckets and are omitted.
    pub fn histogram_buckets(&self) -> Vec<(String, Vec<f64>)> {
        self.views
            .read()
            .iter()
            .filter_map(|view| match view.aggregation() {
                Aggregation::Distribution { bounds } if !bounds.is_empty() => {
                    Some((view.name().to_string(), bounds.clone()))
                }
                _ => None,
            })
            .collect()
    }
}

fn facade_unit(unit: Unit) -> metrics::Unit {
    match unit {
        Unit::Dimensionless => metrics::Unit::Count,
        Unit::Bytes => metrics::Unit::Bytes,
        Unit::Seconds => metrics::Unit::Seconds,
    }
}

impl MetricsSink for MetricsFacade {
    fn activate(&self, views: &[View]) {
        let mut active = self.views.write();
        for view in views {
            if active.iter().any(|v| v.name() == view.name()) {
                continue;
            }
            let name = view.name().to_string();
            let unit = facade_unit(view.measure().unit());
            let description = view.measure().description().to_string();
            match view.aggregation() {
                Aggregation::Count | Aggregation::Sum => {
                    metrics::describe_counter!(name, unit, description)
                }
                Aggregation::Distribution { .. } => {
                    metrics::describe_histogram!(name, unit, description)
                }
            }
            active.push(view.clone());
        }
    }

    fn observe(&self, measurement: &Measurement<'_>) {
        for view in self.views.read().iter() {
            if view.measure() != measurement.measure {
                continue;
            }
            let labels: Vec<Label> = view
                .tag_keys()
                .iter()
                .zip(measurement.tag_values(view.tag_keys()))
                .map(|(key, value)| Label::new(key.name().to_string(), value))
                .collect();
            let name = view.name().to_string();
            match view.aggregation() {
                Aggregation::Count => metrics::counter!(name, labels).increment(1),
                Aggregation::Sum => {
                    let amount = match measurement.value {
                        Value::Int(v) => v,
                        Value::Float(v) => v.max(0.0).round() as u64,
                    };
                    metrics::counter!(name, labels).increment(amount)
                }
                Aggregation::Distribution { .. } => {
                    metrics::histogram!(name, labels).record(measurement.value.as_f64())
                }
            }
        }
    }
}
