use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;
use std::time::Duration;
use wardrive_engine::VendorShare;
use wardrive_runtime::{RejectionCounts, RunOutcome};

use super::format::{format_count, format_elapsed, format_kilobytes};

const RULE_WIDTH: usize = 70;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionLine {
    pub name: String,
    pub ap_count: usize,
    /// `None` when the session has no measurable duration.
    pub duration_minutes: Option<i64>,
}

/// End-of-run report, shown as text or JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub elapsed_seconds: f64,
    pub files_processed: usize,
    pub files_found: usize,
    pub rows_read: u64,
    pub unique_aps: usize,
    pub routes: usize,
    pub rows_per_second: f64,
    pub skipped_bluetooth: u64,
    pub skipped_invalid: u64,
    pub rejected: RejectionCounts,
    pub output: String,
    pub output_bytes: u64,
    /// Sorted by name.
    pub sessions: Vec<SessionLine>,
    pub top_vendors: Vec<VendorShare>,
}

impl RunSummary {
    pub fn new(outcome: &RunOutcome, output: &Path, output_bytes: u64) -> Self {
        let stats = &outcome.stats;

        let mut sessions: Vec<SessionLine> = outcome
            .sessions
            .iter()
            .map(|s| SessionLine {
                name: s.name.to_string(),
                ap_count: s.address_count,
                duration_minutes: (s.duration_seconds != 0.0).then(|| s.duration_minutes()),
            })
            .collect();
        sessions.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            elapsed_seconds: stats.elapsed.as_secs_f64(),
            files_processed: stats.files_processed,
            files_found: stats.files_found,
            rows_read: stats.rows_read,
            unique_aps: outcome.document.metadata.total_aps,
            routes: outcome.document.metadata.total_routes,
            rows_per_second: stats.rows_per_second(),
            skipped_bluetooth: stats.rejected.bluetooth(),
            skipped_invalid: stats.rejected.invalid(),
            rejected: stats.rejected,
            output: output.display().to_string(),
            output_bytes,
            sessions,
            top_vendors: outcome.top_vendors.clone(),
        }
    }

    pub fn render(&self, color: bool) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let heading = |text: &str| {
            if color {
                text.bold().to_string()
            } else {
                text.to_string()
            }
        };

        let mut out = String::new();
        let _ = writeln!(out, "\n{}", rule);
        let _ = writeln!(
            out,
            "{}",
            if color {
                "PROCESSING COMPLETE".green().bold().to_string()
            } else {
                "PROCESSING COMPLETE".to_string()
            }
        );
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(
            out,
            "Total time:       {}",
            format_elapsed(Duration::from_secs_f64(self.elapsed_seconds))
        );
        let _ = writeln!(
            out,
            "Files processed:  {}/{}",
            self.files_processed, self.files_found
        );
        let _ = writeln!(out, "Total rows:       {}", format_count(self.rows_read));
        let _ = writeln!(
            out,
            "Unique APs:       {}",
            format_count(self.unique_aps as u64)
        );
        let _ = writeln!(out, "Route segments:   {}", self.routes);
        let _ = writeln!(out, "Sessions:         {}", self.sessions.len());
        if self.elapsed_seconds > 0.0 {
            let _ = writeln!(
                out,
                "Processing rate:  {:.0} rows/sec",
                self.rows_per_second
            );
        }
        let _ = writeln!(
            out,
            "Skipped (Bluetooth): {}",
            format_count(self.skipped_bluetooth)
        );
        let _ = writeln!(
            out,
            "Skipped (Invalid):   {}",
            format_count(self.skipped_invalid)
        );
        let _ = writeln!(out, "Output:           {}", self.output);
        let _ = writeln!(
            out,
            "File size:        {}",
            format_kilobytes(self.output_bytes)
        );

        let _ = writeln!(out, "\n{}", heading("SESSION SUMMARY:"));
        for session in &self.sessions {
            let duration = match session.duration_minutes {
                Some(minutes) => format!("{}min", minutes),
                None => "N/A".to_string(),
            };
            let _ = writeln!(
                out,
                "  - {}: {} APs, {}",
                session.name, session.ap_count, duration
            );
        }

        let _ = writeln!(out, "\n{}", heading("TOP VENDORS:"));
        for share in &self.top_vendors {
            let _ = writeln!(
                out,
                "  - {}: {} ({:.1}%)",
                share.vendor, share.count, share.percent
            );
        }
        let _ = writeln!(out, "{}", rule);

        out
    }
}
