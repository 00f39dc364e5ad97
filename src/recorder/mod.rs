//! Event recorder: maps retrieval lifecycle events to log records and metric
//! observations.
//!
//! Every method is synchronous and stateless. A call formats at most one log
//! line, hands it to the log sink, then pushes its observations (if any) to
//! the metrics sink, in that order. Nothing here returns an error.

mod events;
pub mod format;

pub use events::{
    CandidateInfo, GetCandidatesResult, QueryResult, RequestInfo, RetrievalResult, WalletInfo,
};
pub use format::{format_cid, format_cid_and_root, format_duration, format_ibytes, IdFormat};

use std::sync::Arc;

use crate::registry::{names, MetricRegistry};
use crate::sink::{EventKind, LogRecord, LogSink, Measurement, MetricsSink, Severity, Tag, Value};
use crate::types::PeerId;

/// Caller-facing hooks, one per retrieval lifecycle event.
pub trait RetrievalObserver: Send + Sync {
    fn wallet_loaded(&self, info: &WalletInfo);

    fn candidates_discovered(&self, request: &RequestInfo, result: &GetCandidatesResult);

    /// Extension point: fires before a candidate is queried.
    fn query_started(&self, candidate: &CandidateInfo);

    fn query_finished(&self, candidate: &CandidateInfo, result: &QueryResult);

    fn retrieval_started(&self, candidate: &CandidateInfo);

    fn retrieval_finished(&self, candidate: &CandidateInfo, result: &RetrievalResult);

    fn miner_connected(&self, peer: &PeerId);

    fn miner_disconnected(&self, peer: &PeerId);

    fn client_connected(&self, peer: &PeerId);

    fn client_disconnected(&self, peer: &PeerId);
}

/// Default [`RetrievalObserver`] writing to a log sink and a metrics sink.
#[derive(Clone)]
pub struct EventRecorder {
    registry: Arc<MetricRegistry>,
    log: Arc<dyn LogSink>,
    metrics: Arc<dyn MetricsSink>,
    id_format: IdFormat,
}

impl EventRecorder {
    pub fn new(
        registry: Arc<MetricRegistry>,
        log: Arc<dyn LogSink>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            registry,
            log,
            metrics,
            id_format: IdFormat::Long,
        }
    }

    pub fn with_id_format(mut self, id_format: IdFormat) -> Self {
        self.id_format = id_format;
        self
    }

    pub fn id_format(&self) -> IdFormat {
        self.id_format
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    fn emit(&self, severity: Severity, event: EventKind, message: String) {
        self.log.log(LogRecord {
            severity,
            event,
            message,
        });
    }

    /// Observe a standard measure. Registries without it are skipped.
    fn observe(&self, measure: &str, value: Value, tags: &[Tag]) {
        match self.registry.measure(measure) {
            Some(measure) => self.metrics.observe(&Measurement {
                measure,
                value,
                tags,
            }),
            None => tracing::debug!(measure, "measure not declared, observation dropped"),
        }
    }

    fn ids(&self, candidate: &CandidateInfo) -> String {
        format_cid_and_root(&candidate.request_cid, &candidate.root_cid, self.id_format)
    }
}

impl RetrievalObserver for EventRecorder {
    fn wallet_loaded(&self, info: &WalletInfo) {
        match (&info.error, &info.address) {
            (Some(err), _) => self.emit(
                Severity::Warn,
                EventKind::WalletLoaded,
                format!(
                    concat!(
                        "Could not load any default wallet address, ",
                        "only free retrievals will be attempted: {}"
                    ),
                    err
                ),
            ),
            (None, Some(address)) => self.emit(
                Severity::Info,
                EventKind::WalletLoaded,
                format!("Using default wallet address {}", address),
            ),
            (None, None) => self.emit(
                Severity::Info,
                EventKind::WalletLoaded,
                "Using default wallet address <unset>".to_string(),
            ),
        }
    }

    fn candidates_discovered(&self, request: &RequestInfo, result: &GetCandidatesResult) {
        if let Some(err) = &result.error {
            self.emit(
                Severity::Error,
                EventKind::CandidatesDiscovered,
                format!(
                    "Could not get candidates for {}: {}",
                    format_cid(&request.request_cid, self.id_format),
                    err
                ),
            );
        } else if result.count > 0 {
            self.emit(
                Severity::Info,
                EventKind::CandidatesDiscovered,
                format!(
                    "Got {} candidates for {}",
                    result.count,
                    format_cid(&request.request_cid, self.id_format)
                ),
            );
        }
    }

    fn query_started(&self, _candidate: &CandidateInfo) {}

    fn query_finished(&self, candidate: &CandidateInfo, result: &QueryResult) {
        if let Some(err) = &result.error {
            self.emit(
                Severity::Error,
                EventKind::QueryFinished,
                format!(
                    "Failed to query miner {} for {}: {}",
                    candidate.peer_id,
                    self.ids(candidate),
                    err
                ),
            );
        }
    }

    fn retrieval_started(&self, candidate: &CandidateInfo) {
        self.emit(
            Severity::Info,
            EventKind::RetrievalStarted,
            format!(
                "Attempting retrieval from miner {} for {}",
                candidate.peer_id,
                self.ids(candidate)
            ),
        );
        self.observe(names::RETRIEVAL_DEALS, Value::Int(1), &[]);
    }

    fn retrieval_finished(&self, candidate: &CandidateInfo, result: &RetrievalResult) {
        if let Some(err) = &result.error {
            let message = err.to_string();
            self.emit(
                Severity::Error,
                EventKind::RetrievalFinished,
                format!(
                    "Failed to retrieve from miner {} for {}: {}",
                    candidate.peer_id,
                    self.ids(candidate),
                    message
                ),
            );
            let tags: Vec<Tag> = self
                .registry
                .tag_key(names::TAG_ERROR)
                .map(|key| Tag {
                    key: key.clone(),
                    value: message,
                })
                .into_iter()
                .collect();
            self.observe(names::RETRIEVAL_DEAL_FAILURES, Value::Int(1), &tags);
            return;
        }

        self.emit(
            Severity::Info,
            EventKind::RetrievalFinished,
            format!(
                concat!(
                    "Successfully retrieved from miner {} for {}",
                    "\n\tDuration: {}",
                    "\n\tBytes Received: {}",
                    "\n\tTotal Payment: {}"
                ),
                candidate.peer_id,
                self.ids(candidate),
                format_duration(result.duration),
                format_ibytes(result.bytes_received),
                result.total_payment
            ),
        );
        self.observe(names::RETRIEVAL_DEAL_SUCCESSES, Value::Int(1), &[]);
        self.observe(
            names::RETRIEVAL_DEAL_DURATION,
            Value::Float(result.duration.as_secs_f64()),
            &[],
        );
        self.observe(names::RETRIEVAL_DEAL_SIZE, Value::Int(result.bytes_received), &[]);
        self.observe(names::BYTES_TRANSFERRED, Value::Int(result.bytes_received), &[]);
        self.observe(
            names::RETRIEVAL_DEAL_COST,
            Value::Float(result.total_payment.as_fil_f64()),
            &[],
        );
    }

    fn miner_connected(&self, peer: &PeerId) {
        self.emit(
            Severity::Info,
            EventKind::MinerConnected,
            format!("Miner {} connected", peer),
        );
    }

    fn miner_disconnected(&self, peer: &PeerId) {
        self.emit(
            Severity::Info,
            EventKind::MinerDisconnected,
            format!("Miner {} disconnected", peer),
        );
    }

    fn client_connected(&self, peer: &PeerId) {
        self.emit(
            Severity::Info,
            EventKind::ClientConnected,
            format!("Client {} connected", peer),
        );
    }

    fn client_disconnected(&self, peer: &PeerId) {
        self.emit(
            Severity::Info,
            EventKind::ClientDisconnected,
            format!("Client {} disconnected", peer),
        );
    }
}
