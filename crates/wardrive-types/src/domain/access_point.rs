use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{Position, SessionName};

/// Merged view of one hardware address across every file in a run.
///
/// `position`, `channel` and (when non-empty) `ssid` always come from the
/// observation that set `best_signal_dbm`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPointRecord {
    pub address: String,
    pub best_signal_dbm: i32,
    pub position: Position,
    pub channel: i32,
    pub ssid: String,
    pub security: String,
    pub vendor: String,
    /// Number of accepted observations.
    pub count: u64,
    pub first_seen: Option<NaiveDateTime>,
    pub last_seen: Option<NaiveDateTime>,
    /// Distinct sessions in first-encountered order.
    pub sessions: Vec<SessionName>,
}

impl AccessPointRecord {
    pub fn sessions_joined(&self) -> String {
        self.sessions
            .iter()
            .map(SessionName::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}
