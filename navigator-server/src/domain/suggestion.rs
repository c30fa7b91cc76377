//! Suggested journeys.
//!
//! A `SuggestedRoute` is one or two `Leg`s. Both types enforce their
//! invariants at construction, so anything holding one can trust that
//! stops lie on the leg's route, the bus runs on it, and connecting legs
//! meet at the transfer stop.

use std::sync::Arc;

use serde::Serialize;

use super::{Bus, DomainError, Eta, Route, Stop};

/// One uninterrupted ride on a single route.
///
/// # Invariants
///
/// - `start` and `end` are both served by `route`
/// - `bus` operates on `route`
/// - a leg with an available ETA travels forward (`start` at or before `end`)
#[derive(Debug, Clone)]
pub struct Leg {
    route: Arc<Route>,
    start: Arc<Stop>,
    end: Arc<Stop>,
    bus: Bus,
    eta: Eta,
}

impl Leg {
    /// Construct a leg, validating it against its route.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - either stop is not on the route
    /// - the bus runs on another route
    /// - the ETA is available but the leg runs against the route order
    pub fn new(
        route: Arc<Route>,
        start: Arc<Stop>,
        end: Arc<Stop>,
        bus: Bus,
        eta: Eta,
    ) -> Result<Self, DomainError> {
        let start_idx = route
            .index_of(&start.id)
            .ok_or_else(|| DomainError::StopNotOnRoute {
                stop: start.id.clone(),
                route: route.id.clone(),
            })?;
        let end_idx = route
            .index_of(&end.id)
            .ok_or_else(|| DomainError::StopNotOnRoute {
                stop: end.id.clone(),
                route: route.id.clone(),
            })?;

        if !bus.serves(&route.id) {
            return Err(DomainError::BusNotOnRoute {
                bus: bus.id.clone(),
                route: route.id.clone(),
            });
        }

        if eta.is_available() && end_idx < start_idx {
            return Err(DomainError::InvalidLeg(
                "a leg with an ETA must travel forward along its route",
            ));
        }

        Ok(Leg {
            route,
            start,
            end,
            bus,
            eta,
        })
    }

    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    pub fn start_stop(&self) -> &Arc<Stop> {
        &self.start
    }

    pub fn end_stop(&self) -> &Arc<Stop> {
        &self.end
    }

    /// The bus assigned to this leg, as it was when the suggestion was made.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn eta(&self) -> Eta {
        self.eta
    }
}

/// Whether a suggestion is a single ride or involves one change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Direct,
    Connecting,
}

/// A journey suggestion: one leg (direct) or two legs (connecting).
#[derive(Debug, Clone)]
pub struct SuggestedRoute {
    kind: SuggestionKind,
    legs: Vec<Leg>,
}

impl SuggestedRoute {
    /// A single-leg journey.
    pub fn direct(leg: Leg) -> Self {
        Self {
            kind: SuggestionKind::Direct,
            legs: vec![leg],
        }
    }

    /// A two-leg journey changing at the first leg's end stop.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the second leg does not start where the first ends.
    pub fn connecting(first: Leg, second: Leg) -> Result<Self, DomainError> {
        if first.end.id != second.start.id {
            return Err(DomainError::TransferMismatch {
                first_end: first.end.id.clone(),
                second_start: second.start.id.clone(),
            });
        }

        Ok(Self {
            kind: SuggestionKind::Connecting,
            legs: vec![first, second],
        })
    }

    pub fn kind(&self) -> SuggestionKind {
        self.kind
    }

    /// The legs in travel order. Never empty.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn first_leg(&self) -> &Leg {
        // Safe: both constructors produce at least one leg
        &self.legs[0]
    }

    /// The stop where the passenger changes, for connecting journeys.
    pub fn transfer_stop(&self) -> Option<&Arc<Stop>> {
        match self.kind {
            SuggestionKind::Direct => None,
            SuggestionKind::Connecting => Some(self.first_leg().end_stop()),
        }
    }

    /// Sum of the leg ETAs; unavailable if any leg lacks one.
    pub fn total_eta(&self) -> Eta {
        self.legs
            .iter()
            .map(Leg::eta)
            .fold(Eta::Minutes(0), |acc, eta| acc + eta)
    }
}
