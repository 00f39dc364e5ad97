//! Telemetry bootstrap.
//!
//! Provides structured logging setup and the process-wide wiring of registry,
//! metrics sink and event recorder.

mod logging;

pub use logging::{init_logging, LogConfig, LogError, LogFormat};

use std::sync::Arc;

use crate::config::{MetricsBackend, TelemetryConfig};
use crate::error::TelemetryError;
use crate::recorder::EventRecorder;
use crate::registry::MetricRegistry;
use crate::sink::{
    MetricsFacade, MetricsSink, MetricsSnapshot, MetricsStore, NoopMetrics, TracingLog,
};

/// Everything the retrieval pipeline needs for observability.
pub struct Telemetry {
    registry: Arc<MetricRegistry>,
    store: Option<Arc<MetricsStore>>,
    facade: Option<Arc<MetricsFacade>>,
    recorder: EventRecorder,
}

impl Telemetry {
    /// Build the registry, activate views, install the log subscriber.
    ///
    /// Call once at startup, before any event is recorded.
    pub fn start(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        init_logging(&config.log)?;
        let telemetry = Self::without_logging(config)?;
        tracing::info!(
            views = telemetry.registry.all_views().len(),
            metrics = config.metrics.as_str(),
            "telemetry started"
        );
        Ok(telemetry)
    }

    /// Same as [`Telemetry::start`] for hosts that own the subscriber.
    pub fn without_logging(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        let registry = Arc::new(MetricRegistry::standard()?);

        let mut store = None;
        let mut facade = None;
        let metrics: Arc<dyn MetricsSink> = match config.metrics {
            MetricsBackend::Facade => {
                let f = Arc::new(MetricsFacade::new());
                facade = Some(f.clone());
                f
            }
            MetricsBackend::Memory => {
                let s = Arc::new(MetricsStore::new());
                store = Some(s.clone());
                s
            }
            MetricsBackend::Off => Arc::new(NoopMetrics),
        };
        metrics.activate(registry.all_views());

        let recorder = EventRecorder::new(registry.clone(), Arc::new(TracingLog), metrics)
            .with_id_format(config.id_format);

        Ok(Self {
            registry,
            store,
            facade,
            recorder,
        })
    }

    pub fn registry(&self) -> &Arc<MetricRegistry> {
        &self.registry
    }

    pub fn recorder(&self) -> &EventRecorder {
        &self.recorder
    }

    /// Explicit distribution bounds for the host's `metrics` exporter; empty
    /// unless the facade backend is active.
    pub fn histogram_buckets(&self) -> Vec<(String, Vec<f64>)> {
        self.facade
            .as_ref()
            .map(|f| f.histogram_buckets())
            .unwrap_or_default()
    }

    /// Aggregated view state; only available with the memory backend.
    pub fn snapshot(&self) -> Option<MetricsSnapshot> {
        self.store.as_ref().map(|s| s.snapshot())
    }
}
