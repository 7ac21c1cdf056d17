use chrono::NaiveDateTime;

/// Placeholder for missing timestamps and dates in human-facing output.
pub const UNKNOWN_TIME: &str = "Unknown";

/// Format as `Jun 01, 2024 14:05`, or `Unknown`.
pub fn format_timestamp(ts: Option<NaiveDateTime>) -> String {
    match ts {
        Some(ts) => ts.format("%b %d, %Y %H:%M").to_string(),
        None => UNKNOWN_TIME.to_string(),
    }
}

/// Format as `2024-06-01`, or `Unknown`.
pub fn format_date(ts: Option<NaiveDateTime>) -> String {
    match ts {
        Some(ts) => ts.format("%Y-%m-%d").to_string(),
        None => UNKNOWN_TIME.to_string(),
    }
}
