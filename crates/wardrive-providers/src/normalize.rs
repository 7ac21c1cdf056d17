use chrono::NaiveDateTime;
use wardrive_core::VendorTable;
use wardrive_types::{
    DEFAULT_CHANNEL, DEFAULT_SIGNAL_DBM, DeviceKind, Observation, Position, RejectReason,
    SessionName, UNKNOWN_VENDOR,
};

use crate::header::{HeaderMap, RawRow, fields, resolve_field};

/// Accepted timestamp layouts, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse a capture timestamp; `None` when empty or in an unknown layout.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if raw.is_empty() {
        return None;
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Turns raw rows of one capture file into observations.
pub struct RecordNormalizer<'a> {
    headers: &'a HeaderMap,
    vendors: &'a VendorTable,
    session: SessionName,
}

impl<'a> RecordNormalizer<'a> {
    pub fn new(headers: &'a HeaderMap, vendors: &'a VendorTable, session: SessionName) -> Self {
        Self {
            headers,
            vendors,
            session,
        }
    }

    pub fn session(&self) -> &SessionName {
        &self.session
    }

    /// Normalize one row.
    ///
    /// Rejection order: Bluetooth kind, missing address, bad coordinates.
    /// A missing timestamp is not a rejection.
    pub fn normalize(&self, row: &RawRow) -> Result<Observation, RejectReason> {
        let field = |candidates: &[&str], default: &str| {
            resolve_field(row, self.headers, candidates, default).map_err(RejectReason::from)
        };

        let kind = DeviceKind::classify(&field(fields::KIND, "WIFI")?);
        if kind == DeviceKind::Bluetooth {
            return Err(RejectReason::NonTargetKind);
        }

        let address = field(fields::ADDRESS, "")?;
        if address.is_empty() {
            return Err(RejectReason::MissingAddress);
        }

        let latitude = parse_coordinate(&field(fields::LATITUDE, "0")?)?;
        let longitude = parse_coordinate(&field(fields::LONGITUDE, "0")?)?;
        let position = Position::new(latitude, longitude);
        if position.is_null_island() {
            return Err(RejectReason::InvalidCoordinates);
        }

        let timestamp = parse_timestamp(&field(fields::TIMESTAMP, "")?);

        let channel = field(fields::CHANNEL, "0")?
            .parse()
            .unwrap_or(DEFAULT_CHANNEL);
        let signal_dbm = field(fields::SIGNAL, "-100")?
            .parse()
            .unwrap_or(DEFAULT_SIGNAL_DBM);

        let ssid = field(fields::SSID, "")?;
        let security = field(fields::SECURITY, "")?.replace(['[', ']'], "");

        let mut vendor = field(fields::VENDOR, "")?;
        if vendor.is_empty() || vendor == UNKNOWN_VENDOR {
            vendor = self.vendors.lookup(&address).to_string();
        }

        Ok(Observation {
            kind,
            address,
            position,
            signal_dbm,
            channel,
            ssid,
            security,
            vendor,
            timestamp,
            session: self.session.clone(),
        })
    }
}

fn parse_coordinate(raw: &str) -> Result<f64, RejectReason> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RejectReason::InvalidCoordinates),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const WIGLE_HEADER: &str =
        "MAC,SSID,AuthMode,FirstSeen,Channel,RSSI,CurrentLatitude,CurrentLongitude,Type";

    fn vendors() -> VendorTable {
        VendorTable::from_entries([("C0A36E", "SKY UK LIMITED")])
    }

    fn normalize(line: &str) -> Result<Observation, RejectReason> {
        let headers = HeaderMap::from_line(WIGLE_HEADER);
        let vendors = vendors();
        let normalizer = RecordNormalizer::new(&headers, &vendors, SessionName::new("drive"));
        let row = RawRow::from_record(&headers, line.split(','));
        normalizer.normalize(&row)
    }

    #[test]
    fn test_normalize_full_row() {
        let obs = normalize(
            "C0:A3:6E:01:02:03,HomeNet,[WPA2-PSK-CCMP][ESS],2024-06-01 14:05:59,6,-61,51.5,-0.12,WIFI",
        )
        .unwrap();

        assert_eq!(obs.kind, DeviceKind::Wifi);
        assert_eq!(obs.address, "C0:A3:6E:01:02:03");
        assert_eq!(obs.ssid, "HomeNet");
        assert_eq!(obs.security, "WPA2-PSK-CCMPESS");
        assert_eq!(obs.channel, 6);
        assert_eq!(obs.signal_dbm, -61);
        assert_eq!(obs.position, Position::new(51.5, -0.12));
        assert_eq!(obs.vendor, "SKY UK LIMITED");
        assert_eq!(obs.session.as_str(), "drive");
        assert_eq!(
            obs.timestamp,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(14, 5, 59)
        );
    }

    #[test]
    fn test_bluetooth_rejected_even_with_bad_coordinates() {
        let result = normalize("11:22:33:44:55:66,,,,,,0,0,BLE");
        assert_eq!(result, Err(RejectReason::NonTargetKind));
    }

    #[test]
    fn test_missing_address() {
        let result = normalize(",Net,,,,,51.5,-0.12,WIFI");
        assert_eq!(result, Err(RejectReason::MissingAddress));
    }

    #[test]
    fn test_zero_coordinates_rejected_even_with_timestamp() {
        let result = normalize("11:22:33:44:55:66,Net,,2024-06-01 14:05:59,1,-50,0,0,WIFI");
        assert_eq!(result, Err(RejectReason::InvalidCoordinates));
    }

    #[test]
    fn test_unparsable_coordinates() {
        let result = normalize("11:22:33:44:55:66,Net,,,1,-50,north,-0.12,WIFI");
        assert_eq!(result, Err(RejectReason::InvalidCoordinates));
        let result = normalize("11:22:33:44:55:66,Net,,,1,-50,NaN,-0.12,WIFI");
        assert_eq!(result, Err(RejectReason::InvalidCoordinates));
    }

    #[test]
    fn test_one_zero_coordinate_is_accepted() {
        let obs = normalize("11:22:33:44:55:66,Net,,,1,-50,0,-0.12,WIFI").unwrap();
        assert_eq!(obs.position, Position::new(0.0, -0.12));
    }

    #[test]
    fn test_defaults_for_unparsable_numbers() {
        let obs = normalize("11:22:33:44:55:66,Net,,,six,strong,51.5,-0.12,WIFI").unwrap();
        assert_eq!(obs.channel, DEFAULT_CHANNEL);
        assert_eq!(obs.signal_dbm, DEFAULT_SIGNAL_DBM);
    }

    #[test]
    fn test_missing_timestamp_is_not_a_rejection() {
        let obs = normalize("11:22:33:44:55:66,Net,,yesterday,1,-50,51.5,-0.12,WIFI").unwrap();
        assert_eq!(obs.timestamp, None);
    }

    #[test]
    fn test_short_row_is_invalid() {
        let result = normalize("11:22:33:44:55:66,Net,,2024-06-01 14:05:59");
        assert_eq!(result, Err(RejectReason::InvalidRow));
    }

    #[test]
    fn test_vendor_hint_preferred_over_table() {
        let headers = HeaderMap::from_line("BSSID,SSID,lat,lon,Vendor");
        let vendors = vendors();
        let normalizer = RecordNormalizer::new(&headers, &vendors, SessionName::new("s"));

        let row = RawRow::from_record(&headers, ["C0:A3:6E:01:02:03", "x", "1", "2", "Acme"]);
        assert_eq!(normalizer.normalize(&row).unwrap().vendor, "Acme");

        let row = RawRow::from_record(&headers, ["C0:A3:6E:01:02:03", "x", "1", "2", "Unknown"]);
        assert_eq!(normalizer.normalize(&row).unwrap().vendor, "SKY UK LIMITED");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(14, 5, 59)
            .unwrap();
        assert_eq!(parse_timestamp("2024-06-01 14:05:59"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-01T14:05:59"), Some(expected));

        let fractional = parse_timestamp("2024-06-01 14:05:59.250000").unwrap();
        assert_eq!(fractional.and_utc().timestamp_subsec_millis(), 250);

        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("06/01/2024"), None);
    }
}
