mod access_point;
mod route;
mod session;

pub use access_point::AccessPointRecord;
pub use route::RoutePoint;
pub use session::{SessionName, SessionSummary};
