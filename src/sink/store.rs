//! Thread-safe, in-process view aggregation.
//!
//! Complements the `metrics` facade: observations are aggregated here per
//! activated view so they can be snapshotted and exported without an external
//! backend.

use std::collections::{BTreeMap, HashMap};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use super::{Measurement, MetricsSink};
use crate::registry::{Aggregation, View};

/// Snapshot of every activated view at a point in time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub views: Vec<ViewSnapshot>,
}

impl MetricsSnapshot {
    pub fn view(&self, name: &str) -> Option<&ViewSnapshot> {
        self.views.iter().find(|v| v.name == name)
    }
}

/// Aggregated rows of one view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub name: String,
    pub aggregation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<f64>,
    pub rows: Vec<RowSnapshot>,
}

impl ViewSnapshot {
    /// Observation count across all rows.
    pub fn total_count(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    pub fn total_sum(&self) -> f64 {
        self.rows.iter().map(|r| r.sum).sum()
    }

    /// Row whose tags match exactly.
    pub fn row(&self, tags: &[(&str, &str)]) -> Option<&RowSnapshot> {
        self.rows.iter().find(|r| {
            r.tags.len() == tags.len()
                && tags
                    .iter()
                    .all(|(k, v)| r.tags.get(*k).map(String::as_str) == Some(*v))
        })
    }
}

/// One tag-value combination of a view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowSnapshot {
    pub tags: BTreeMap<String, String>,
    pub count: u64,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
    /// Per-bucket counts for distributions; `bounds.len() + 1` entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buckets: Vec<u64>,
}

#[derive(Debug, Clone)]
struct RowData {
    count: u64,
    sum: f64,
    min: f64,
    max: f64,
    buckets: Vec<u64>,
}

impl RowData {
    fn new(aggregation: &Aggregation) -> Self {
        let buckets = match aggregation {
            Aggregation::Distribution { bounds } => vec![0; bounds.len() + 1],
            _ => Vec::new(),
        };
        Self {
            count: 0,
            sum: 0.0,
            min: f64::MAX,
            max: f64::MIN,
            buckets,
        }
    }

    fn record(&mut self, aggregation: &Aggregation, value: f64) {
        self.count += 1;
        match aggregation {
            Aggregation::Count => {}
            Aggregation::Sum => self.sum += value,
            Aggregation::Distribution { bounds } => {
                self.sum += value;
                self.min = self.min.min(value);
                self.max = self.max.max(value);
                let idx = bounds.partition_point(|b| *b <= value);
                self.buckets[idx] += 1;
            }
        }
    }

    fn to_snapshot(&self, tags: BTreeMap<String, String>) -> RowSnapshot {
        let observed = self.count > 0 && !self.buckets.is_empty();
        RowSnapshot {
            tags,
            count: self.count,
            sum: self.sum,
            min: if observed { self.min } else { 0.0 },
            max: if observed { self.max } else { 0.0 },
            buckets: self.buckets.clone(),
        }
    }
}

struct ViewState {
    view: View,
    rows: Mutex<HashMap<Vec<String>, RowData>>,
}

/// Aggregates observations per activated view.
pub struct MetricsStore {
    views: RwLock<Vec<ViewState>>,
}

impl MetricsStore {
    /// Create a store with no active views.
    pub fn new() -> Self {
        Self {
            views: RwLock::new(Vec::new()),
        }
    }

    /// Names of the active views, in activation order.
    pub fn active_views(&self) -> Vec<String> {
        self.views
            .read()
            .iter()
            .map(|s| s.view.name().to_string())
            .collect()
    }

    /// Take a snapshot of all views. Rows are ordered by tag values.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let views = self.views.read();
        let views = views
            .iter()
            .map(|state| {
                let rows = state.rows.lock();
                let mut keyed: Vec<_> = rows.iter().collect();
                keyed.sort_by(|a, b| a.0.cmp(b.0));
                let rows = keyed
                    .into_iter()
                    .map(|(values, data)| {
                        let tags = state
                            .view
                            .tag_keys()
                            .iter()
                            .zip(values)
                            .map(|(k, v)| (k.name().to_string(), v.clone()))
                            .collect();
                        data.to_snapshot(tags)
                    })
                    .collect();
                ViewSnapshot {
                    name: state.view.name().to_string(),
                    aggregation: state.view.aggregation().as_str().to_string(),
                    bounds: state.view.aggregation().bounds().to_vec(),
                    rows,
                }
            })
            .collect();
        MetricsSnapshot { views }
    }

    /// Drop all aggregated rows, keeping the active views.
    pub fn reset(&self) {
        for state in self.views.read().iter() {
            state.rows.lock().clear();
        }
    }
}

impl Default for MetricsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSink for MetricsStore {
    fn activate(&self, views: &[View]) {
        let mut active = self.views.write();
        for view in views {
            if active.iter().any(|s| s.view.name() == view.name()) {
                continue;
            }
            active.push(ViewState {
                view: view.clone(),
                rows: Mutex::new(HashMap::new()),
            });
        }
    }

    fn observe(&self, measurement: &Measurement<'_>) {
        let value = measurement.value.as_f64();
        for state in self.views.read().iter() {
            if state.view.measure() != measurement.measure {
                continue;
            }
            let key = measurement.tag_values(state.view.tag_keys());
            let aggregation = state.view.aggregation();
            state
                .rows
                .lock()
                .entry(key)
                .or_insert_with(|| RowData::new(aggregation))
                .record(aggregation, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{MeasureKind, RegistryBuilder, Unit};
    use crate::sink::{Tag, Value};

    #[test]
    fn test_distribution_buckets() {
        let mut b = RegistryBuilder::new();
        let m = b
            .declare_measure("latency", "d", Unit::Seconds, MeasureKind::Float64)
            .unwrap();
        b.declare_view(&m, Aggregation::distribution(&[0.0, 10.0, 20.0]), &[])
            .unwrap();
        let registry = b.build();

        let store = MetricsStore::new();
        store.activate(registry.all_views());
        for v in [-1.0, 0.0, 5.0, 10.0, 25.0] {
            store.observe(&Measurement {
                measure: &m,
                value: Value::Float(v),
                tags: &[],
            });
        }

        let snap = store.snapshot();
        let row = &snap.view("latency").unwrap().rows[0];
        assert_eq!(row.count, 5);
        assert_eq!(row.buckets, vec![1, 2, 1, 1]);
        assert_eq!(row.min, -1.0);
        assert_eq!(row.max, 25.0);
        assert_eq!(row.sum, 39.0);
    }

    #[test]
    fn test_tags_projected_onto_view_keys() {
        let mut b = RegistryBuilder::new();
        let m = b
            .declare_measure("responses", "d", Unit::Dimensionless, MeasureKind::Int64)
            .unwrap();
        let topic = b.declare_tag_key("topic").unwrap();
        let status = b.declare_tag_key("status").unwrap();
        b.declare_view(&m, Aggregation::Count, &[topic.clone()]).unwrap();
        let registry = b.build();

        let store = MetricsStore::new();
        store.activate(registry.all_views());
        let tags = [
            Tag {
                key: topic.clone(),
                value: "blocks".to_string(),
            },
            Tag {
                key: status,
                value: "ok".to_string(),
            },
        ];
        for tags in [&tags[..], &tags[..1], &[]] {
            store.observe(&Measurement {
                measure: &m,
                value: Value::Int(1),
                tags,
            });
        }

        let snap = store.snapshot();
        let view = snap.view("responses").unwrap();
        assert_eq!(view.total_count(), 3);
        assert_eq!(view.row(&[("topic", "blocks")]).unwrap().count, 2);
        assert_eq!(view.row(&[("topic", "")]).unwrap().count, 1);
    }

    #[test]
    fn test_activation_is_idempotent_and_reset_keeps_views() {
        let registry = crate::registry::MetricRegistry::standard().unwrap();
        let store = MetricsStore::new();
        store.activate(registry.all_views());
        store.activate(registry.all_views());
        assert_eq!(store.active_views().len(), 12);

        let m = registry.measure(crate::registry::names::RETRIEVAL_DEALS).unwrap();
        store.observe(&Measurement {
            measure: m,
            value: Value::Int(1),
            tags: &[],
        });
        store.reset();
        let snap = store.snapshot();
        assert_eq!(snap.views.len(), 12);
        assert_eq!(snap.view(m.name()).unwrap().total_count(), 0);
    }
}
