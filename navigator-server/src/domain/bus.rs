//! Bus type.

use serde::{Deserialize, Serialize};

use super::{BusId, Position, RouteId};

/// A simulated vehicle running along a route.
///
/// `current_stop_index` is the last stop passed (or the stop the bus is
/// at); `progress` in `[0, 1)` is how far it has moved towards the next
/// stop. The simulation owns mutation; the route finder only reads
/// snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bus {
    pub id: BusId,
    pub route_id: RouteId,
    pub current_stop_index: usize,
    pub progress: f64,
    /// Progress units per simulation tick.
    pub speed: f64,
    pub position: Position,
}

impl Bus {
    /// Whether the bus runs on `route`.
    pub fn serves(&self, route: &RouteId) -> bool {
        &self.route_id == route
    }

    /// Whether the bus has not yet moved beyond the stop at `index`.
    pub fn can_reach(&self, index: usize) -> bool {
        self.current_stop_index <= index
    }

    /// Number of stops the bus still has to pass to reach `index`.
    ///
    /// Zero once the bus is at or past `index`.
    pub fn stops_until(&self, index: usize) -> usize {
        index.saturating_sub(self.current_stop_index)
    }
}
