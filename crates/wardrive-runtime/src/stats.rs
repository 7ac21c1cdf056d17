use serde::Serialize;
use std::time::Duration;
use wardrive_types::RejectReason;

/// Skipped-row counters, one per rejection reason.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RejectionCounts {
    pub non_target_kind: u64,
    pub missing_address: u64,
    pub invalid_coordinates: u64,
    pub invalid_row: u64,
}

impl RejectionCounts {
    pub fn record(&mut self, reason: RejectReason) {
        *self.slot(reason) += 1;
    }

    pub fn get(&self, reason: RejectReason) -> u64 {
        match reason {
            RejectReason::NonTargetKind => self.non_target_kind,
            RejectReason::MissingAddress => self.missing_address,
            RejectReason::InvalidCoordinates => self.invalid_coordinates,
            RejectReason::InvalidRow => self.invalid_row,
        }
    }

    /// Bluetooth and other non-Wi-Fi rows.
    pub fn bluetooth(&self) -> u64 {
        self.non_target_kind
    }

    /// Rows dropped for bad data rather than device kind.
    pub fn invalid(&self) -> u64 {
        self.missing_address + self.invalid_coordinates + self.invalid_row
    }

    pub fn total(&self) -> u64 {
        RejectReason::ALL.iter().map(|&r| self.get(r)).sum()
    }

    fn slot(&mut self, reason: RejectReason) -> &mut u64 {
        match reason {
            RejectReason::NonTargetKind => &mut self.non_target_kind,
            RejectReason::MissingAddress => &mut self.missing_address,
            RejectReason::InvalidCoordinates => &mut self.invalid_coordinates,
            RejectReason::InvalidRow => &mut self.invalid_row,
        }
    }
}

/// Counters for one run.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub files_found: usize,
    /// Files whose rows were read to the end.
    pub files_processed: usize,
    pub rows_read: u64,
    pub rejected: RejectionCounts,
    #[serde(rename = "elapsed_seconds", serialize_with = "as_seconds")]
    pub elapsed: Duration,
}

impl RunStats {
    pub fn rows_per_second(&self) -> f64 {
        rate(self.rows_read, self.elapsed)
    }
}

pub(crate) fn rate(rows: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 { rows as f64 / secs } else { 0.0 }
}

fn as_seconds<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}
