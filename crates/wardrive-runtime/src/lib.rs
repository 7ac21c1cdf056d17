// Runtime layer - orchestrates one batch run over a data directory
// Owns configuration, the file loop, counters and progress events

pub mod config;
pub mod error;
pub mod events;
pub mod output;
pub mod pipeline;
pub mod stats;
pub mod vendor;

pub use config::{Config, OuiConfig};
pub use error::{Error, Result};
pub use events::{NullReporter, PROGRESS_INTERVAL, RecordingReporter, Reporter, RunEvent};
pub use output::write_geojson;
pub use pipeline::{Pipeline, RunOutcome, TOP_VENDORS};
pub use stats::{RejectionCounts, RunStats};
pub use vendor::{RefreshReport, VendorLookup, lookup_in, lookup_vendor, refresh_vendors};
