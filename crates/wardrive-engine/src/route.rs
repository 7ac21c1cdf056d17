use std::collections::HashMap;
use wardrive_types::{Position, RoutePoint, SessionName};

/// Chronological observer track of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub session: SessionName,
    pub positions: Vec<Position>,
}

impl Route {
    /// A line needs at least two points.
    pub fn is_drawable(&self) -> bool {
        self.positions.len() > 1
    }

    /// GeoJSON `[lon, lat]` pairs.
    pub fn coordinates(&self) -> Vec<[f64; 2]> {
        self.positions.iter().map(Position::to_lon_lat).collect()
    }
}

/// Sort every route point by time, then split by session.
///
/// The sort is stable, so points sharing a timestamp keep arrival order.
/// Routes come out in the order their session first appears in the sorted
/// sequence.
pub fn reconstruct_routes(points: &[RoutePoint]) -> Vec<Route> {
    let mut sorted: Vec<&RoutePoint> = points.iter().collect();
    sorted.sort_by_key(|point| point.timestamp);

    let mut routes: Vec<Route> = Vec::new();
    let mut index: HashMap<&SessionName, usize> = HashMap::new();

    for point in sorted {
        let idx = *index.entry(&point.session).or_insert_with(|| {
            routes.push(Route {
                session: point.session.clone(),
                positions: Vec::new(),
            });
            routes.len() - 1
        });
        routes[idx].positions.push(point.position);
    }

    routes
}
