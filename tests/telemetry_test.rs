//! Telemetry bootstrap tests.

use std::path::PathBuf;
use std::time::Duration;

use retrieval_telemetry::recorder::{CandidateInfo, IdFormat, RetrievalObserver, RetrievalResult};
use retrieval_telemetry::registry::names;
use retrieval_telemetry::telemetry::{LogConfig, LogError, LogFormat};
use retrieval_telemetry::{MetricsBackend, Telemetry, TelemetryConfig, TokenAmount};

// =============================================================================
// LogConfig Tests
// =============================================================================

#[test]
fn log_config_default_is_json() {
    let config = LogConfig::default();
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, "info");
    assert!(config.output_path.is_none());
}

#[test]
fn log_config_with_output_path() {
    let config = LogConfig {
        format: LogFormat::Json,
        level: "retrieval=debug".to_string(),
        output_path: Some(PathBuf::from("/tmp/retrieval.log")),
    };
    assert_eq!(config.output_path, Some(PathBuf::from("/tmp/retrieval.log")));
}

// =============================================================================
// LogError Tests
// =============================================================================

#[test]
fn log_error_invalid_filter_display() {
    let error = LogError::InvalidFilter("bad filter".to_string());
    assert!(error.to_string().contains("Invalid log filter"));
    assert!(error.to_string().contains("bad filter"));
}

#[test]
fn log_error_already_initialized_display() {
    let error = LogError::AlreadyInitialized;
    assert!(error.to_string().contains("already initialized"));
}

// =============================================================================
// Startup Wiring Tests
// =============================================================================

#[test]
fn memory_backend_exposes_snapshot() {
    let config = TelemetryConfig {
        metrics: MetricsBackend::Memory,
        ..TelemetryConfig::default()
    };
    let telemetry = Telemetry::without_logging(&config).unwrap();
    let candidate = CandidateInfo::new("QmA", "QmA", "P");
    telemetry.recorder().retrieval_started(&candidate);
    telemetry.recorder().retrieval_finished(
        &candidate,
        &RetrievalResult::succeeded(Duration::from_secs(1), 100, TokenAmount::ZERO),
    );

    let snap = telemetry.snapshot().unwrap();
    assert_eq!(snap.views.len(), 12);
    assert_eq!(snap.view(names::RETRIEVAL_DEALS).unwrap().total_count(), 1);
    assert_eq!(snap.view(names::RETRIEVAL_DEAL_SUCCESSES).unwrap().total_count(), 1);
    assert_eq!(snap.view(names::BYTES_TRANSFERRED).unwrap().total_sum(), 100.0);
}

#[test]
fn facade_and_off_backends_have_no_snapshot() {
    for metrics in [MetricsBackend::Facade, MetricsBackend::Off] {
        let config = TelemetryConfig {
            metrics,
            ..TelemetryConfig::default()
        };
        let telemetry = Telemetry::without_logging(&config).unwrap();
        telemetry
            .recorder()
            .retrieval_started(&CandidateInfo::new("QmA", "QmA", "P"));
        assert!(telemetry.snapshot().is_none());
        assert_eq!(telemetry.registry().all_views().len(), 12);
    }
}

#[test]
fn facade_backend_reports_duration_buckets() {
    let telemetry = Telemetry::without_logging(&TelemetryConfig::default()).unwrap();
    let buckets = telemetry.histogram_buckets();
    assert_eq!(
        buckets,
        vec![(
            names::RETRIEVAL_DEAL_DURATION.to_string(),
            names::DEAL_DURATION_BOUNDS.to_vec()
        )]
    );

    let memory = TelemetryConfig {
        metrics: MetricsBackend::Memory,
        ..TelemetryConfig::default()
    };
    let telemetry = Telemetry::without_logging(&memory).unwrap();
    assert!(telemetry.histogram_buckets().is_empty());
}

#[test]
fn id_format_flows_into_recorder() {
    let config = TelemetryConfig {
        id_format: IdFormat::Short,
        metrics: MetricsBackend::Off,
        ..TelemetryConfig::default()
    };
    let telemetry = Telemetry::without_logging(&config).unwrap();
    assert_eq!(telemetry.recorder().id_format(), IdFormat::Short);
}

#[test]
fn snapshot_serializes_to_json() {
    let config = TelemetryConfig {
        metrics: MetricsBackend::Memory,
        ..TelemetryConfig::default()
    };
    let telemetry = Telemetry::without_logging(&config).unwrap();
    telemetry.recorder().retrieval_finished(
        &CandidateInfo::new("QmA", "QmA", "P"),
        &RetrievalResult::succeeded(Duration::from_secs(700), 10, TokenAmount::ZERO),
    );
    let json = serde_json::to_value(telemetry.snapshot().unwrap()).unwrap();
    let views = json["views"].as_array().unwrap();
    let duration = views
        .iter()
        .find(|v| v["name"] == names::RETRIEVAL_DEAL_DURATION)
        .unwrap();
    // 700s overflows the last bound.
    assert_eq!(duration["rows"][0]["buckets"][12], 1);
}
