//! Network loading and validation errors.

use std::path::PathBuf;

use crate::domain::{BusId, RouteId, StopId};

/// Errors that can occur when building a transit network or its fleet.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Two stops share an ID
    #[error("duplicate stop id: {0}")]
    DuplicateStop(StopId),

    /// Two routes share an ID
    #[error("duplicate route id: {0}")]
    DuplicateRoute(RouteId),

    /// A route references a stop that isn't defined
    #[error("route {route} references unknown stop {stop}")]
    UnknownStop { route: RouteId, stop: StopId },

    /// A route needs at least two stops to be travelled
    #[error("route {0} must have at least two stops")]
    RouteTooShort(RouteId),

    /// Two buses share an ID
    #[error("duplicate bus id: {0}")]
    DuplicateBus(BusId),

    /// A bus runs on a route that isn't defined
    #[error("bus {bus} runs on unknown route {route}")]
    UnknownRoute { bus: BusId, route: RouteId },

    /// A bus's stop index is beyond the end of its route
    #[error("bus {bus} is at stop index {index} but its route has {len} stops")]
    StopIndexOutOfRange { bus: BusId, index: usize, len: usize },

    /// A bus's speed is zero, negative or not a number
    #[error("bus {0} must have a positive speed")]
    InvalidSpeed(BusId),

    /// A bus's progress is outside [0, 1)
    #[error("bus {0} must have progress in [0, 1)")]
    InvalidProgress(BusId),

    /// Failed to read the network file
    #[error("failed to read network file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse network JSON
    #[error("network JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
