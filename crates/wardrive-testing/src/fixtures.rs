//! Fixtures for capture data generation and placement.
//!
//! Provides utilities to:
//! - Build WiGLE-style capture CSV files row by row
//! - Build small IEEE OUI registry files
//! - Copy the checked-in sample captures

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Column header written by WiGLE WiFi exports.
pub const WIGLE_HEADER: &str = "MAC,SSID,AuthMode,FirstSeen,Channel,RSSI,CurrentLatitude,CurrentLongitude,AltitudeMeters,AccuracyMeters,Type";

/// Device metadata line that precedes the header in WiGLE exports.
pub const WIGLE_PREHEADER: &str =
    "WigleWifi-1.4,appRelease=2.64,model=Pixel 7,release=14,device=panther,brand=google";

/// One capture row in WiGLE column order.
#[derive(Debug, Clone)]
pub struct CaptureRow {
    pub mac: String,
    pub ssid: String,
    pub auth: String,
    pub first_seen: String,
    pub channel: String,
    pub rssi: String,
    pub latitude: String,
    pub longitude: String,
    pub kind: String,
}

impl CaptureRow {
    /// A Wi-Fi sighting with a fix and no timestamp.
    pub fn wifi(mac: &str, rssi: i32, latitude: f64, longitude: f64) -> Self {
        Self {
            mac: mac.to_string(),
            ssid: "Network".to_string(),
            auth: "[WPA2-PSK-CCMP][ESS]".to_string(),
            first_seen: String::new(),
            channel: "6".to_string(),
            rssi: rssi.to_string(),
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
            kind: "WIFI".to_string(),
        }
    }

    pub fn ssid(mut self, ssid: &str) -> Self {
        self.ssid = ssid.to_string();
        self
    }

    pub fn auth(mut self, auth: &str) -> Self {
        self.auth = auth.to_string();
        self
    }

    /// `YYYY-MM-DD HH:MM:SS` or any other raw value.
    pub fn at(mut self, first_seen: &str) -> Self {
        self.first_seen = first_seen.to_string();
        self
    }

    pub fn channel(mut self, channel: i32) -> Self {
        self.channel = channel.to_string();
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    fn fields(&self) -> [&str; 11] {
        [
            self.mac.as_str(),
            self.ssid.as_str(),
            self.auth.as_str(),
            self.first_seen.as_str(),
            self.channel.as_str(),
            self.rssi.as_str(),
            self.latitude.as_str(),
            self.longitude.as_str(),
            "30",
            "5",
            self.kind.as_str(),
        ]
    }
}

/// Line-oriented builder for capture files.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuilder {
    lines: Vec<String>,
}

impl CaptureBuilder {
    /// Empty file; add a header with [`CaptureBuilder::line`].
    pub fn new() -> Self {
        Self::default()
    }

    /// WiGLE export: pre-header line followed by the column header.
    pub fn wigle() -> Self {
        Self::new().line(WIGLE_PREHEADER).line(WIGLE_HEADER)
    }

    /// Raw line, written verbatim.
    pub fn line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn row(mut self, row: CaptureRow) -> Self {
        self.lines.push(encode_record(&row.fields()));
        self
    }

    pub fn rows(self, rows: impl IntoIterator<Item = CaptureRow>) -> Self {
        rows.into_iter().fold(self, Self::row)
    }

    pub fn build(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.build())?;
        Ok(())
    }
}

/// Minimal IEEE registry CSV with the given `(assignment, organization)` pairs.
pub fn oui_registry(entries: &[(&str, &str)]) -> String {
    let mut text = String::from("Registry,Assignment,Organization Name,Organization Address\n");
    for &(assignment, organization) in entries {
        text.push_str(&encode_record(&["MA-L", assignment, organization, "Somewhere"]));
        text.push('\n');
    }
    text
}

fn encode_record(fields: &[&str]) -> String {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer
        .write_record(fields)
        .expect("Failed to encode CSV record");
    let bytes = writer.into_inner().expect("Failed to flush CSV record");
    String::from_utf8(bytes)
        .expect("CSV record is not UTF-8")
        .trim_end_matches('\n')
        .to_string()
}

/// Sample file manager for checked-in captures.
pub struct SampleFiles {
    samples_dir: PathBuf,
}

impl Default for SampleFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleFiles {
    /// Assumes samples are in `crates/wardrive-providers/tests/samples/`.
    pub fn new() -> Self {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let samples_dir = manifest_dir
            .parent()
            .map(|crates| crates.join("wardrive-providers/tests/samples"))
            .unwrap_or_else(|| manifest_dir.join("samples"));

        Self { samples_dir }
    }

    pub fn path(&self, sample_name: &str) -> PathBuf {
        self.samples_dir.join(sample_name)
    }

    /// Copy a sample file to a destination.
    pub fn copy_to(&self, sample_name: &str, dest: &Path) -> Result<()> {
        fs::copy(self.path(sample_name), dest)?;
        Ok(())
    }
}
