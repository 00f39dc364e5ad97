//! End-to-end: global subscriber writing JSON records to a file.
//!
//! Lives in its own test binary because the subscriber can only be installed
//! once per process.

use retrieval_telemetry::recorder::{CandidateInfo, QueryResult, RetrievalObserver};
use retrieval_telemetry::telemetry::{LogConfig, LogError, LogFormat};
use retrieval_telemetry::{
    MetricsBackend, ReportedError, Telemetry, TelemetryConfig, TelemetryError,
};

#[test]
fn records_reach_json_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("retrieval.log");
    let config = TelemetryConfig {
        log: LogConfig {
            format: LogFormat::Json,
            level: "info".to_string(),
            output_path: Some(path.clone()),
        },
        metrics: MetricsBackend::Off,
        ..TelemetryConfig::default()
    };

    let telemetry = Telemetry::start(&config).unwrap();
    telemetry.recorder().query_finished(
        &CandidateInfo::new("QmA", "QmB", "P"),
        &QueryResult::failed(ReportedError::msg("timeout")),
    );

    let contents = std::fs::read_to_string(&path).unwrap();
    let line = contents
        .lines()
        .find(|l| l.contains("Failed to query miner"))
        .unwrap();
    let record: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(record["level"], "ERROR");
    assert_eq!(record["target"], "retrieval");
    assert_eq!(record["fields"]["event"], "query_finished");
    assert_eq!(
        record["fields"]["message"],
        "Failed to query miner P for QmA (root QmB): timeout"
    );

    // A second install must fail instead of silently replacing the first.
    let err = Telemetry::start(&config).err().unwrap();
    assert!(matches!(err, TelemetryError::Log(LogError::AlreadyInitialized)));
}
