//! Stop type.

use serde::{Deserialize, Serialize};

use super::{Position, StopId};

/// A named point in the transit network.
///
/// Stops are static reference data: loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub position: Position,
}

impl Stop {
    /// Create a stop.
    pub fn new(id: StopId, name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            position,
        }
    }
}
