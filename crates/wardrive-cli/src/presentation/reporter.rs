use owo_colors::OwoColorize;
use std::io::Write;
use wardrive_runtime::{Reporter, RunEvent};

use super::format::{format_count, format_elapsed};

/// Prints per-file progress to stdout in plain mode; silent in JSON mode.
pub struct ConsoleReporter {
    enabled: bool,
    interactive: bool,
}

impl ConsoleReporter {
    /// `interactive` enables colour and in-place progress lines.
    pub fn new(enabled: bool, interactive: bool) -> Self {
        Self {
            enabled,
            interactive,
        }
    }

    fn warn(&self, text: &str) -> String {
        if self.interactive {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: RunEvent) {
        if !self.enabled {
            return;
        }

        match event {
            RunEvent::FileStarted {
                file_name,
                index,
                total,
            } => {
                let name = if self.interactive {
                    file_name.bold().to_string()
                } else {
                    file_name
                };
                println!("[{}/{}] Processing: {}", index, total, name);
            }
            RunEvent::HeaderFound { line, .. } => {
                println!("   Found headers at line {}", line);
            }
            RunEvent::HeaderMissing { .. } => {
                println!("   {}", self.warn("No header row found, skipping"));
            }
            RunEvent::Progress {
                rows,
                rows_per_second,
                ..
            } => {
                // In-place on a terminal, dropped otherwise.
                if self.interactive {
                    print!("   {} rows ({:.0}/sec)\r", format_count(rows), rows_per_second);
                    let _ = std::io::stdout().flush();
                }
            }
            RunEvent::FileFinished {
                rows,
                addresses,
                elapsed,
                ..
            } => {
                let mark = if self.interactive {
                    "✓".green().to_string()
                } else {
                    "✓".to_string()
                };
                let pad = if self.interactive {
                    " ".repeat(20)
                } else {
                    String::new()
                };
                println!(
                    "   {} {} rows, {} APs in {}{}",
                    mark,
                    format_count(rows),
                    format_count(addresses as u64),
                    format_elapsed(elapsed),
                    pad
                );
            }
            RunEvent::FileFailed { message, .. } => {
                println!("   {}", self.warn(&format!("Error: {}", message)));
            }
        }
    }
}
