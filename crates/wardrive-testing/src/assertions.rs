//! Custom assertions for the emitted GeoJSON document.
//!
//! Provides high-level checks that make tests more readable:
//! - Feature counts per layer
//! - Access point lookup by hardware address
//! - Route geometry and metadata totals

use anyhow::{Context, Result};
use serde_json::Value;

fn features(doc: &Value) -> Result<&Vec<Value>> {
    doc["features"]
        .as_array()
        .context("Expected 'features' array in GeoJSON")
}

/// Features whose `properties.layer` matches.
pub fn layer_features<'a>(doc: &'a Value, layer: &str) -> Result<Vec<&'a Value>> {
    Ok(features(doc)?
        .iter()
        .filter(|f| f["properties"]["layer"] == layer)
        .collect())
}

/// Assert the number of features on a layer (`access_points` or `route`).
pub fn assert_layer_count(doc: &Value, layer: &str, expected: usize) -> Result<()> {
    let actual = layer_features(doc, layer)?.len();
    if actual != expected {
        anyhow::bail!("Expected {} '{}' features, got {}", expected, layer, actual);
    }
    Ok(())
}

/// Properties of the access point feature with this address.
pub fn access_point<'a>(doc: &'a Value, mac: &str) -> Result<&'a Value> {
    layer_features(doc, "access_points")?
        .into_iter()
        .find(|f| f["properties"]["MAC"] == mac)
        .map(|f| &f["properties"])
        .with_context(|| format!("No access point feature for {}", mac))
}

/// Coordinates of the route line for a session.
pub fn route_coordinates(doc: &Value, session: &str) -> Result<Vec<[f64; 2]>> {
    let route = layer_features(doc, "route")?
        .into_iter()
        .find(|f| f["properties"]["session"] == session)
        .with_context(|| format!("No route feature for session {}", session))?;

    route["geometry"]["coordinates"]
        .as_array()
        .context("Route geometry has no coordinates")?
        .iter()
        .map(|pair| {
            let lon = pair[0].as_f64().context("Longitude is not a number")?;
            let lat = pair[1].as_f64().context("Latitude is not a number")?;
            Ok([lon, lat])
        })
        .collect()
}

/// Assert that point features precede line features.
pub fn assert_points_before_lines(doc: &Value) -> Result<()> {
    let mut seen_line = false;
    for (i, feature) in features(doc)?.iter().enumerate() {
        match feature["geometry"]["type"].as_str() {
            Some("LineString") => seen_line = true,
            Some("Point") if seen_line => {
                anyhow::bail!("Point feature {} follows a line feature", i)
            }
            _ => {}
        }
    }
    Ok(())
}

/// Assert `metadata.total_aps` and `metadata.total_routes`.
pub fn assert_totals(doc: &Value, aps: u64, routes: u64) -> Result<()> {
    let metadata = &doc["metadata"];
    let total_aps = metadata["total_aps"]
        .as_u64()
        .context("Expected 'metadata.total_aps'")?;
    let total_routes = metadata["total_routes"]
        .as_u64()
        .context("Expected 'metadata.total_routes'")?;

    if (total_aps, total_routes) != (aps, routes) {
        anyhow::bail!(
            "Expected {} APs and {} routes, got {} and {}",
            aps,
            routes,
            total_aps,
            total_routes
        );
    }
    Ok(())
}
