//! Measures and tag keys.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Numeric type of a measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureKind {
    Int64,
    Float64,
}

/// Unit of a measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Dimensionless,
    Bytes,
    Seconds,
}

impl Unit {
    /// UCUM-style symbol.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dimensionless => "1",
            Self::Bytes => "By",
            Self::Seconds => "s",
        }
    }
}

#[derive(Debug)]
struct MeasureDef {
    name: String,
    description: String,
    unit: Unit,
    kind: MeasureKind,
}

/// Handle to a declared measure. Identity is the name.
#[derive(Debug, Clone)]
pub struct Measure(Arc<MeasureDef>);

impl Measure {
    pub(crate) fn new(name: &str, description: &str, unit: Unit, kind: MeasureKind) -> Self {
        Self(Arc::new(MeasureDef {
            name: name.to_string(),
            description: description.to_string(),
            unit,
            kind,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn description(&self) -> &str {
        &self.0.description
    }

    pub fn unit(&self) -> Unit {
        self.0.unit
    }

    pub fn kind(&self) -> MeasureKind {
        self.0.kind
    }

    pub(crate) fn same_handle(&self, other: &Measure) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Measure {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Measure {}

/// Handle to a declared tag key.
#[derive(Debug, Clone)]
pub struct TagKey(Arc<str>);

impl TagKey {
    pub(crate) fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub(crate) fn same_handle(&self, other: &TagKey) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for TagKey {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for TagKey {}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
