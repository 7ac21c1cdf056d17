use std::time::Duration;

/// Rows between two `Progress` events within one file.
pub const PROGRESS_INTERVAL: u64 = 100;

/// Progress notifications emitted while a run walks its capture files.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    FileStarted {
        file_name: String,
        index: usize,
        total: usize,
    },
    HeaderFound {
        file_name: String,
        /// 1-based
        line: usize,
    },
    HeaderMissing {
        file_name: String,
    },
    Progress {
        file_name: String,
        rows: u64,
        rows_per_second: f64,
    },
    FileFinished {
        file_name: String,
        rows: u64,
        addresses: usize,
        elapsed: Duration,
    },
    FileFailed {
        file_name: String,
        message: String,
    },
}

/// Receives run events. Purely observational.
pub trait Reporter {
    fn report(&mut self, event: RunEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _event: RunEvent) {}
}

/// Keeps every event, for inspection after the run.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    pub events: Vec<RunEvent>,
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: RunEvent) {
        self.events.push(event);
    }
}
