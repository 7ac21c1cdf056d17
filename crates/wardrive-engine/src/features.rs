use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use wardrive_types::{AccessPointRecord, Position, format_timestamp};

use crate::route::Route;

/// Half-width of the uniform offset added to each access point coordinate.
pub const DEFAULT_JITTER_DEGREES: f64 = 0.0002;

const HIDDEN_SSID: &str = "(Hidden)";

/// Offset a position by already-drawn amounts.
pub fn jitter_position(base: Position, lat_offset: f64, lon_offset: f64) -> Position {
    Position::new(base.latitude + lat_offset, base.longitude + lon_offset)
}

/// Seedable source of location jitter.
#[derive(Debug, Clone)]
pub struct Jitter {
    amount: f64,
    rng: StdRng,
}

impl Jitter {
    /// `seed = None` draws from OS entropy. A non-finite amount disables jitter.
    pub fn new(amount: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let amount = if amount.is_finite() {
            amount.abs()
        } else {
            log::warn!("Ignoring non-finite jitter amount {}", amount);
            0.0
        };
        Self { amount, rng }
    }

    /// Leaves positions untouched.
    pub fn disabled() -> Self {
        Self::new(0.0, Some(0))
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Draws latitude first, then longitude.
    pub fn apply(&mut self, base: Position) -> Position {
        if self.amount == 0.0 {
            return base;
        }
        let lat = self.rng.gen_range(-self.amount..=self.amount);
        let lon = self.rng.gen_range(-self.amount..=self.amount);
        jitter_position(base, lat, lon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: Vec<[f64; 2]> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    AccessPoints,
    Route,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPointProperties {
    #[serde(rename = "MAC")]
    pub address: String,
    #[serde(rename = "SSID")]
    pub ssid: String,
    #[serde(rename = "AuthMode")]
    pub security: String,
    #[serde(rename = "Vendor")]
    pub vendor: String,
    #[serde(rename = "Channel")]
    pub channel: i32,
    pub best_rssi: i32,
    pub count: u64,
    pub first_seen: String,
    pub last_seen: String,
    pub sessions: String,
    pub layer: Layer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteProperties {
    pub session: String,
    pub layer: Layer,
    pub point_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureProperties {
    AccessPoint(AccessPointProperties),
    Route(RouteProperties),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: FeatureProperties,
}

impl Feature {
    pub fn layer(&self) -> Layer {
        match &self.properties {
            FeatureProperties::AccessPoint(p) => p.layer,
            FeatureProperties::Route(p) => p.layer,
        }
    }
}

/// Turns merged records and routes into GeoJSON features.
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    jitter: Jitter,
}

impl FeatureBuilder {
    pub fn new(jitter: Jitter) -> Self {
        Self { jitter }
    }

    pub fn access_point_feature(&mut self, record: &AccessPointRecord) -> Feature {
        let position = self.jitter.apply(record.position);
        Feature {
            geometry: Geometry::Point {
                coordinates: position.to_lon_lat(),
            },
            properties: FeatureProperties::AccessPoint(AccessPointProperties {
                address: record.address.clone(),
                ssid: display_ssid(&record.ssid),
                security: record.security.clone(),
                vendor: record.vendor.clone(),
                channel: record.channel,
                best_rssi: record.best_signal_dbm,
                count: record.count,
                first_seen: format_timestamp(record.first_seen),
                last_seen: format_timestamp(record.last_seen),
                sessions: record.sessions_joined(),
                layer: Layer::AccessPoints,
            }),
        }
    }

    /// `None` for routes with fewer than two points.
    pub fn route_feature(&self, route: &Route) -> Option<Feature> {
        if !route.is_drawable() {
            return None;
        }
        Some(Feature {
            geometry: Geometry::LineString {
                coordinates: route.coordinates(),
            },
            properties: FeatureProperties::Route(RouteProperties {
                session: route.session.to_string(),
                layer: Layer::Route,
                point_count: route.positions.len(),
            }),
        })
    }
}

/// Quotes are dropped entirely; nothing left means hidden.
fn display_ssid(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|&c| c != '"').collect();
    if cleaned.is_empty() {
        HIDDEN_SSID.to_string()
    } else {
        cleaned
    }
}
