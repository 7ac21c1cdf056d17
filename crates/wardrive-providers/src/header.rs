use std::collections::HashMap;
use std::fmt;

use wardrive_types::RejectReason;

/// Column synonyms per logical field, in priority order.
///
/// Capture tools disagree on naming (WiGLE writes `MAC`/`CurrentLatitude`,
/// Kismet exports `BSSID`/`lat`), so every lookup goes through these lists.
pub mod fields {
    pub const KIND: &[&str] = &["Type"];
    pub const ADDRESS: &[&str] = &["MAC", "BSSID"];
    pub const LATITUDE: &[&str] = &["CurrentLatitude", "Latitude", "lat"];
    pub const LONGITUDE: &[&str] = &["CurrentLongitude", "Longitude", "lon"];
    pub const TIMESTAMP: &[&str] = &["FirstSeen", "Timestamp", "Time", "DateTime"];
    pub const CHANNEL: &[&str] = &["Channel"];
    pub const SIGNAL: &[&str] = &["RSSI", "Signal"];
    pub const SSID: &[&str] = &["SSID"];
    pub const SECURITY: &[&str] = &["AuthMode", "Encryption"];
    pub const VENDOR: &[&str] = &["MfgrId", "Vendor"];
}

/// Column header of one capture file with case-insensitive lookup.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    headers: Vec<String>,
    /// lowercase name -> original header text
    normalized: HashMap<String, String>,
}

impl HeaderMap {
    /// Split a raw header line on commas, trimming each name.
    pub fn from_line(line: &str) -> Self {
        Self::from_fields(line.split(','))
    }

    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let headers: Vec<String> = fields
            .into_iter()
            .map(|f| f.as_ref().trim().to_string())
            .collect();
        let normalized = headers
            .iter()
            .map(|h| (h.to_lowercase(), h.clone()))
            .collect();

        Self {
            headers,
            normalized,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Original header text for a logical name, ignoring case.
    pub fn original(&self, name: &str) -> Option<&str> {
        self.normalized
            .get(&name.to_lowercase())
            .map(String::as_str)
    }

    pub fn contains_any(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.original(name).is_some())
    }

    /// A header line must name both an address column and the SSID column.
    pub fn is_capture_header(&self) -> bool {
        self.contains_any(fields::ADDRESS) && self.contains_any(fields::SSID)
    }
}

/// One data row keyed by original header text.
///
/// Columns past the end of a short row are kept as `None` so that reading
/// them can be told apart from reading an empty cell.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    values: HashMap<String, Option<String>>,
}

impl RawRow {
    pub fn from_record<I, S>(headers: &HeaderMap, record: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values: HashMap<String, Option<String>> = HashMap::new();
        let mut cells = record.into_iter();

        for header in headers.headers() {
            let cell = cells.next().map(|c| c.as_ref().to_string());
            values.insert(header.clone(), cell);
        }

        Self { values }
    }

    /// `Err` when the row is too short to contain `header`.
    pub fn value(&self, header: &str) -> std::result::Result<&str, FieldError> {
        match self.values.get(header) {
            Some(Some(value)) => Ok(value.as_str()),
            Some(None) => Err(FieldError::MissingColumn(header.to_string())),
            None => Ok(""),
        }
    }
}

/// Row-level lookup failure; surfaces as an invalid-row rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    MissingColumn(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::MissingColumn(name) => write!(f, "row has no value for column '{}'", name),
        }
    }
}

impl std::error::Error for FieldError {}

impl From<FieldError> for RejectReason {
    fn from(_: FieldError) -> Self {
        RejectReason::InvalidRow
    }
}

/// First non-empty trimmed value among `candidates`, or `default`.
pub fn resolve_field(
    row: &RawRow,
    headers: &HeaderMap,
    candidates: &[&str],
    default: &str,
) -> std::result::Result<String, FieldError> {
    for candidate in candidates {
        let Some(original) = headers.original(candidate) else {
            continue;
        };
        let value = row.value(original)?.trim();
        if !value.is_empty() {
            return Ok(value.to_string());
        }
    }
    Ok(default.to_string())
}
