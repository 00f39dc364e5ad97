//! Sink capabilities consumed by the recorder.
//!
//! The recorder never aggregates or writes anything itself. Log records go to
//! a [`LogSink`], numeric observations to a [`MetricsSink`]. Both must be safe
//! for concurrent use; the recorder takes no locks.

mod facade;
mod memory;
mod store;
mod tracing_log;

pub use facade::MetricsFacade;
pub use memory::MemoryLog;
pub use store::{MetricsSnapshot, MetricsStore, RowSnapshot, ViewSnapshot};
pub use tracing_log::{TracingLog, LOG_TARGET};

use serde::{Deserialize, Serialize};

use crate::registry::{Measure, TagKey, View};

/// Log severity chosen by the recorder per event branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// Domain event a log record was produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    WalletLoaded,
    CandidatesDiscovered,
    QueryFinished,
    RetrievalStarted,
    RetrievalFinished,
    MinerConnected,
    MinerDisconnected,
    ClientConnected,
    ClientDisconnected,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WalletLoaded => "wallet_loaded",
            Self::CandidatesDiscovered => "candidates_discovered",
            Self::QueryFinished => "query_finished",
            Self::RetrievalStarted => "retrieval_started",
            Self::RetrievalFinished => "retrieval_finished",
            Self::MinerConnected => "miner_connected",
            Self::MinerDisconnected => "miner_disconnected",
            Self::ClientConnected => "client_connected",
            Self::ClientDisconnected => "client_disconnected",
        }
    }
}

/// One formatted log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub severity: Severity,
    pub event: EventKind,
    pub message: String,
}

/// Leveled log writer.
pub trait LogSink: Send + Sync {
    fn log(&self, record: LogRecord);
}

/// Observed value, typed after the measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(u64),
    Float(f64),
}

impl Value {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

/// A tag value attached to an observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: TagKey,
    pub value: String,
}

/// A single tagged observation of a measure.
#[derive(Debug, Clone)]
pub struct Measurement<'a> {
    pub measure: &'a Measure,
    pub value: Value,
    pub tags: &'a [Tag],
}

impl Measurement<'_> {
    /// Tag values projected onto `keys`; missing tags become empty strings.
    pub fn tag_values(&self, keys: &[TagKey]) -> Vec<String> {
        keys.iter()
            .map(|key| {
                self.tags
                    .iter()
                    .find(|t| t.key == *key)
                    .map(|t| t.value.clone())
                    .unwrap_or_default()
            })
            .collect()
    }
}

/// Aggregating metrics backend.
pub trait MetricsSink: Send + Sync {
    /// Activate the process's views. Called once at startup.
    fn activate(&self, views: &[View]);

    fn observe(&self, measurement: &Measurement<'_>);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn activate(&self, _views: &[View]) {}

    fn observe(&self, _measurement: &Measurement<'_>) {}
}
