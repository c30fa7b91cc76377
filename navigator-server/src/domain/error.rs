//! Domain error types.
//!
//! These errors represent suggestions that would break the leg invariants.
//! The route finder never builds such values from a validated network, so
//! seeing one means a defect, not bad user input.

use super::{BusId, RouteId, StopId};

/// Domain-level errors for leg and suggestion construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A leg endpoint is not on the leg's route
    #[error("stop {stop} is not served by route {route}")]
    StopNotOnRoute { stop: StopId, route: RouteId },

    /// The assigned bus runs on a different route
    #[error("bus {bus} does not operate on route {route}")]
    BusNotOnRoute { bus: BusId, route: RouteId },

    /// Invalid leg construction (e.g., estimated leg travelling backwards)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// Connecting legs don't meet at a common stop
    #[error("first leg ends at {first_end} but second leg starts at {second_start}")]
    TransferMismatch {
        first_end: StopId,
        second_start: StopId,
    },
}
