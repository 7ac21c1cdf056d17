pub mod format;
pub mod reporter;
pub mod summary;

pub use reporter::ConsoleReporter;
pub use summary::{RunSummary, SessionLine};

use is_terminal::IsTerminal;

/// Colour only when stdout is an interactive terminal.
pub fn stdout_supports_color() -> bool {
    std::io::stdout().is_terminal()
}
