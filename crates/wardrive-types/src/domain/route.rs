use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{Position, SessionName};

/// Observer fix recorded from a timestamped row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub timestamp: NaiveDateTime,
    pub position: Position,
    pub session: SessionName,
}
