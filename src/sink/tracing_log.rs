use super::{LogRecord, LogSink, Severity};

/// Target used for every record the recorder emits.
pub const LOG_TARGET: &str = "retrieval";

/// Forwards records to the installed `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl LogSink for TracingLog {
    fn log(&self, record: LogRecord) {
        let event = record.event.as_str();
        match record.severity {
            Severity::Info => tracing::info!(target: LOG_TARGET, event, "{}", record.message),
            Severity::Warn => tracing::warn!(target: LOG_TARGET, event, "{}", record.message),
            Severity::Error => tracing::error!(target: LOG_TARGET, event, "{}", record.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::EventKind;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_forwards_level_target_and_event() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingLog.log(LogRecord {
                severity: Severity::Warn,
                event: EventKind::WalletLoaded,
                message: "no wallet".to_string(),
            });
        });

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains(LOG_TARGET));
        assert!(output.contains("wallet_loaded"));
        assert!(output.contains("no wallet"));
    }
}
