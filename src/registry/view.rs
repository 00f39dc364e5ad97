//! Views: how a measure is aggregated and sliced.

use serde::{Deserialize, Serialize};

use super::measure::{Measure, MeasureKind, TagKey, Unit};

/// Aggregation applied by a view.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    /// Number of observations.
    Count,
    /// Sum of observed values.
    Sum,
    /// Bucketed distribution. Empty bounds means a single catch-all bucket.
    Distribution { bounds: Vec<f64> },
}

impl Aggregation {
    pub fn distribution(bounds: &[f64]) -> Self {
        Self::Distribution {
            bounds: bounds.to_vec(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Distribution { .. } => "distribution",
        }
    }

    pub fn bounds(&self) -> &[f64] {
        match self {
            Self::Distribution { bounds } => bounds,
            _ => &[],
        }
    }
}

/// A measure bound to an aggregation and an ordered set of tag keys.
#[derive(Debug, Clone)]
pub struct View {
    measure: Measure,
    aggregation: Aggregation,
    tag_keys: Vec<TagKey>,
}

impl View {
    pub(crate) fn new(measure: Measure, aggregation: Aggregation, tag_keys: Vec<TagKey>) -> Self {
        Self {
            measure,
            aggregation,
            tag_keys,
        }
    }

    /// Views are named after their measure.
    pub fn name(&self) -> &str {
        self.measure.name()
    }

    pub fn measure(&self) -> &Measure {
        &self.measure
    }

    pub fn aggregation(&self) -> &Aggregation {
        &self.aggregation
    }

    pub fn tag_keys(&self) -> &[TagKey] {
        &self.tag_keys
    }

    pub fn descriptor(&self) -> ViewDescriptor {
        ViewDescriptor {
            name: self.name().to_string(),
            description: self.measure.description().to_string(),
            unit: self.measure.unit(),
            kind: self.measure.kind(),
            aggregation: self.aggregation.as_str().to_string(),
            bounds: self.aggregation.bounds().to_vec(),
            tag_keys: self.tag_keys.iter().map(|k| k.name().to_string()).collect(),
        }
    }
}

/// Flat, serializable description of a view for export and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewDescriptor {
    pub name: String,
    pub description: String,
    pub unit: Unit,
    pub kind: MeasureKind,
    pub aggregation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_keys: Vec<String>,
}
