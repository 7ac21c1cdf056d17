use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::aggregator::Aggregator;
use crate::features::{Feature, FeatureBuilder, Layer};
use crate::route::reconstruct_routes;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub name: String,
    pub date: String,
    pub ap_count: usize,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub sessions: Vec<SessionMetadata>,
    pub total_aps: usize,
    pub total_routes: usize,
    /// Local time, `%Y-%m-%d %H:%M:%S`.
    pub generated: String,
}

/// The single output document of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    pub metadata: Metadata,
}

impl FeatureCollection {
    pub fn access_point_count(&self) -> usize {
        self.count_layer(Layer::AccessPoints)
    }

    pub fn route_count(&self) -> usize {
        self.count_layer(Layer::Route)
    }

    fn count_layer(&self, layer: Layer) -> usize {
        self.features.iter().filter(|f| f.layer() == layer).count()
    }
}

/// Build the document: every access point, then every drawable route.
pub fn assemble(
    aggregator: &Aggregator,
    builder: &mut FeatureBuilder,
    generated: NaiveDateTime,
) -> FeatureCollection {
    let mut features: Vec<Feature> = aggregator
        .access_points()
        .iter()
        .map(|record| builder.access_point_feature(record))
        .collect();
    let total_aps = features.len();

    let routes = reconstruct_routes(aggregator.route_points());
    features.extend(routes.iter().filter_map(|route| builder.route_feature(route)));
    let total_routes = features.len() - total_aps;

    log::debug!(
        "Assembled {} access point features and {} route features",
        total_aps,
        total_routes
    );

    let sessions = aggregator
        .sessions()
        .iter()
        .map(|s| SessionMetadata {
            name: s.name.to_string(),
            date: s.date.clone(),
            ap_count: s.address_count,
            duration_minutes: s.duration_minutes(),
        })
        .collect();

    FeatureCollection {
        features,
        metadata: Metadata {
            sessions,
            total_aps,
            total_routes,
            generated: generated.format("%Y-%m-%d %H:%M:%S").to_string(),
        },
    }
}
