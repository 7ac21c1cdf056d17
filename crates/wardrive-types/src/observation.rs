use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::SessionName;

/// Vendor label used when neither the capture row nor the OUI table knows the maker.
pub const UNKNOWN_VENDOR: &str = "Unknown";

/// Vendor label for locally administered (software-randomized) addresses.
pub const RANDOMIZED_VENDOR: &str = "Randomized";

/// Signal strength assumed when the RSSI column is missing or unparsable.
pub const DEFAULT_SIGNAL_DBM: i32 = -100;

/// Channel assumed when the channel column is missing or unparsable.
pub const DEFAULT_CHANNEL: i32 = 0;

/// Some capture tools write hidden networks as a literal pair of double quotes.
pub const QUOTED_EMPTY_SSID: &str = "\"\"";

/// Radio family of a captured row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Wifi,
    Bluetooth,
}

impl DeviceKind {
    /// Classify the raw `Type` column.
    ///
    /// Anything that does not mention BLE or Bluetooth is treated as Wi-Fi,
    /// which matches how capture tools label GSM/LTE rows inconsistently.
    pub fn classify(raw: &str) -> Self {
        let upper = raw.to_uppercase();
        if upper.contains("BLE") || upper.contains("BLUETOOTH") {
            DeviceKind::Bluetooth
        } else {
            DeviceKind::Wifi
        }
    }
}

/// Observer position in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// GPS receivers report (0, 0) before they have a fix.
    pub fn is_null_island(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }

    /// GeoJSON coordinate order.
    pub fn to_lon_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// One accepted capture row, normalized across capture-tool schemas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub kind: DeviceKind,
    /// Hardware address exactly as written by the capture tool (aggregation key).
    pub address: String,
    pub position: Position,
    pub signal_dbm: i32,
    pub channel: i32,
    /// May be empty for hidden networks.
    pub ssid: String,
    /// Security mode with `[` and `]` stripped.
    pub security: String,
    /// Capture-supplied vendor, or the OUI resolution when the row had none.
    pub vendor: String,
    pub timestamp: Option<NaiveDateTime>,
    pub session: SessionName,
}

/// Why a capture row did not become an [`Observation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Bluetooth / BLE rows.
    NonTargetKind,
    MissingAddress,
    /// Unparsable coordinates or the (0, 0) no-fix position.
    InvalidCoordinates,
    /// Anything else that went wrong while reading the row.
    InvalidRow,
}

impl RejectReason {
    pub const ALL: [RejectReason; 4] = [
        RejectReason::NonTargetKind,
        RejectReason::MissingAddress,
        RejectReason::InvalidCoordinates,
        RejectReason::InvalidRow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::NonTargetKind => "non_target_kind",
            RejectReason::MissingAddress => "missing_address",
            RejectReason::InvalidCoordinates => "invalid_coordinates",
            RejectReason::InvalidRow => "invalid_row",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_bluetooth_variants() {
        assert_eq!(DeviceKind::classify("BLE"), DeviceKind::Bluetooth);
        assert_eq!(DeviceKind::classify("ble"), DeviceKind::Bluetooth);
        assert_eq!(DeviceKind::classify("Bluetooth"), DeviceKind::Bluetooth);
        assert_eq!(DeviceKind::classify("BT-BLE"), DeviceKind::Bluetooth);
    }

    #[test]
    fn test_classify_everything_else_as_wifi() {
        assert_eq!(DeviceKind::classify("WIFI"), DeviceKind::Wifi);
        assert_eq!(DeviceKind::classify(""), DeviceKind::Wifi);
        assert_eq!(DeviceKind::classify("GSM"), DeviceKind::Wifi);
    }

    #[test]
    fn test_null_island() {
        assert!(Position::new(0.0, 0.0).is_null_island());
        assert!(!Position::new(0.0, 12.5).is_null_island());
        assert!(!Position::new(-33.9, 0.0).is_null_island());
    }

    #[test]
    fn test_lon_lat_order() {
        assert_eq!(Position::new(45.5, -122.6).to_lon_lat(), [-122.6, 45.5]);
    }

    #[test]
    fn test_reject_reason_serializes_snake_case() {
        let json = serde_json::to_string(&RejectReason::InvalidCoordinates).unwrap();
        assert_eq!(json, "\"invalid_coordinates\"");
    }
}
