use parking_lot::Mutex;

use super::{EventKind, LogRecord, LogSink, Severity};

/// Keeps every record in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    pub fn at(&self, severity: Severity) -> Vec<LogRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.severity == severity)
            .cloned()
            .collect()
    }

    pub fn for_event(&self, event: EventKind) -> Vec<LogRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.event == event)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl LogSink for MemoryLog {
    fn log(&self, record: LogRecord) {
        self.records.lock().push(record);
    }
}
