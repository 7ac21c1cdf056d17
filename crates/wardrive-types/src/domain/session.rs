use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Capture session identifier, derived from the capture file name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionName(String);

impl SessionName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Derive the session name from a capture file name.
    ///
    /// Drops a trailing `.csv` (any case) and every occurrence of `suffix`,
    /// so `2024-06-01_wardriving.csv` becomes `2024-06-01`.
    pub fn from_file_name(file_name: &str, suffix: &str) -> Self {
        let stem = match file_name.len().checked_sub(4) {
            Some(cut)
                if file_name.is_char_boundary(cut)
                    && file_name[cut..].eq_ignore_ascii_case(".csv") =>
            {
                &file_name[..cut]
            }
            _ => file_name,
        };

        if suffix.is_empty() {
            Self(stem.to_string())
        } else {
            Self(stem.replace(suffix, ""))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-file capture summary, finalized when the file has been fully read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub name: SessionName,
    /// `%Y-%m-%d` of the earliest timestamp, or `Unknown`.
    pub date: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    /// Distinct hardware addresses observed in this file.
    pub address_count: usize,
    /// Zero unless both bounds are present.
    pub duration_seconds: f64,
}

impl SessionSummary {
    /// Whole minutes, truncated.
    pub fn duration_minutes(&self) -> i64 {
        (self.duration_seconds / 60.0) as i64
    }
}
