//! Route type.

use serde::{Deserialize, Serialize};

use super::{RouteId, StopId};

/// An ordered sequence of stops served by buses.
///
/// The stop order is the direction of travel. Routes are treated as
/// strictly one-way: a leg is only considered forward along this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    pub stops: Vec<StopId>,
}

impl Route {
    /// Create a route.
    pub fn new(id: RouteId, name: impl Into<String>, stops: Vec<StopId>) -> Self {
        Self {
            id,
            name: name.into(),
            stops,
        }
    }

    /// Position of `stop` in the route's stop order (first occurrence).
    pub fn index_of(&self, stop: &StopId) -> Option<usize> {
        self.stops.iter().position(|s| s == stop)
    }

    /// Whether the route serves `stop`.
    pub fn serves(&self, stop: &StopId) -> bool {
        self.index_of(stop).is_some()
    }

    /// Index of the stop after `index`, wrapping from the last stop to the first.
    ///
    /// Returns `None` for an empty route.
    pub fn next_index(&self, index: usize) -> Option<usize> {
        if self.stops.is_empty() {
            return None;
        }
        Some((index + 1) % self.stops.len())
    }

    /// Number of stops on the route.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
