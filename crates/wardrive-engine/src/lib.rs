// Engine module - cross-file aggregation and GeoJSON construction
// This layer sits between normalized observations (types) and the runtime/CLI

pub mod aggregator;
pub mod assembler;
pub mod features;
pub mod merge;
pub mod route;
pub mod stats;

pub use aggregator::Aggregator;
pub use assembler::{FeatureCollection, Metadata, SessionMetadata, assemble};
pub use features::{
    AccessPointProperties, DEFAULT_JITTER_DEGREES, Feature, FeatureBuilder, FeatureProperties,
    Geometry, Jitter, Layer, RouteProperties, jitter_position,
};
pub use route::{Route, reconstruct_routes};
pub use stats::{VendorShare, vendor_distribution};
