//! Grid coordinates.

use serde::{Deserialize, Serialize};

/// A point on the synthetic map grid.
///
/// The fields are named after latitude/longitude to match the map layer,
/// but the space is a flat plane: distances are Euclidean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    /// Create a position.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Straight-line distance to another position, in grid units.
    ///
    /// ```
    /// use navigator_server::domain::Position;
    ///
    /// let a = Position::new(5.0, 5.0);
    /// let b = Position::new(8.0, 9.0);
    /// assert_eq!(a.distance_to(&b), 5.0);
    /// ```
    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.lat - other.lat).hypot(self.lng - other.lng)
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(&self, other: &Position, t: f64) -> Position {
        Position {
            lat: self.lat + (other.lat - self.lat) * t,
            lng: self.lng + (other.lng - self.lng) * t,
        }
    }
}
