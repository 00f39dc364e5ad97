//! Retrieval telemetry
//!
//! Observability layer for a peer-to-peer content retrieval client. Turns
//! retrieval lifecycle events into leveled log lines and aggregated metrics.
//!
//! # Layout
//!
//! - [`registry`]: fixed vocabulary of measures, tag keys and views
//! - [`recorder`]: one method per lifecycle event, log and metric mapping
//! - [`sink`]: log and metrics capabilities (tracing, `metrics` facade, in-memory)
//! - [`telemetry`]: subscriber setup and startup wiring
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use retrieval_telemetry::recorder::{CandidateInfo, RetrievalObserver, RetrievalResult};
//! use retrieval_telemetry::registry::MetricRegistry;
//! use retrieval_telemetry::sink::{MemoryLog, MetricsSink, MetricsStore};
//! use retrieval_telemetry::{EventRecorder, TokenAmount};
//!
//! let registry = Arc::new(MetricRegistry::standard().unwrap());
//! let store = Arc::new(MetricsStore::new());
//! store.activate(registry.all_views());
//! let log = Arc::new(MemoryLog::new());
//! let recorder = EventRecorder::new(registry, log.clone(), store.clone());
//!
//! let candidate = CandidateInfo::new("Qm123", "Qm123", "P");
//! recorder.retrieval_started(&candidate);
//! recorder.retrieval_finished(
//!     &candidate,
//!     &RetrievalResult::succeeded(Duration::from_secs(5), 2048, TokenAmount::ZERO),
//! );
//! assert_eq!(log.len(), 2);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod recorder;
pub mod registry;
pub mod sink;
pub mod telemetry;
pub mod types;

pub use config::{MetricsBackend, TelemetryConfig};
pub use error::{ConfigError, RegistryError, TelemetryError};
pub use recorder::{EventRecorder, IdFormat, RetrievalObserver};
pub use registry::MetricRegistry;
pub use telemetry::Telemetry;
pub use types::{Cid, PeerId, ReportedError, TokenAmount, WalletAddress};
