// Error types
pub mod error;

// Column synonym tables and case-insensitive lookup
pub mod header;

// Row to Observation normalization
pub mod normalize;

// Capture file reading
pub mod reader;

// Capture file discovery
pub mod discovery;

pub use discovery::{CaptureDiscovery, CaptureFile};
pub use error::{Error, Result};
pub use header::{FieldError, HeaderMap, RawRow, fields, resolve_field};
pub use normalize::{RecordNormalizer, parse_timestamp};
pub use reader::CaptureLog;
