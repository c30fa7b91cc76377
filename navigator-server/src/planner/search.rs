//! Route search.
//!
//! Finds direct and one-change journeys between two stops on a validated
//! network, assigning the nearest serviceable bus to each leg.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error, trace};

use crate::domain::{Bus, DomainError, Eta, Leg, Route, RouteId, Stop, StopId, SuggestedRoute};
use crate::network::TransitNetwork;

use super::config::FinderConfig;
use super::rank::rank_suggestions;

/// Route finder over a static network.
///
/// The finder never mutates its inputs. Bus positions come from the
/// `buses` snapshot passed to each query; callers are responsible for
/// handing over a consistent snapshot.
pub struct RouteFinder<'a> {
    network: &'a TransitNetwork,
    config: &'a FinderConfig,
}

impl<'a> RouteFinder<'a> {
    /// Create a new route finder.
    pub fn new(network: &'a TransitNetwork, config: &'a FinderConfig) -> Self {
        Self { network, config }
    }

    /// Suggest journeys from `origin` to `destination`, best first.
    ///
    /// Returns an empty list when the stops are equal, either stop is
    /// unknown, or no route serves both stops with a bus on it. An empty
    /// result is the "nothing found" signal, not an error.
    pub fn find(
        &self,
        origin: &StopId,
        destination: &StopId,
        buses: &[Bus],
    ) -> Vec<SuggestedRoute> {
        if origin == destination {
            debug!(%origin, "origin equals destination");
            return Vec::new();
        }

        let (Some(origin_stop), Some(destination_stop)) =
            (self.network.stop(origin), self.network.stop(destination))
        else {
            debug!(%origin, %destination, "unknown stop");
            return Vec::new();
        };

        let mut candidates = self.direct_routes(origin_stop, destination_stop, buses);
        candidates.extend(self.connecting_routes(origin_stop, destination_stop, buses));

        if candidates.is_empty() {
            candidates = self.fallback_routes(origin_stop, destination_stop, buses);
        }

        let found = candidates.len();
        let ranked = rank_suggestions(candidates, self.config.max_results);

        debug!(
            %origin,
            %destination,
            found,
            returned = ranked.len(),
            "route search complete"
        );

        ranked
    }

    /// One suggestion per route that runs forward from origin to destination
    /// and has a bus that hasn't passed the origin yet.
    fn direct_routes(
        &self,
        origin: &Arc<Stop>,
        destination: &Arc<Stop>,
        buses: &[Bus],
    ) -> Vec<SuggestedRoute> {
        let mut found = Vec::new();

        for route in self.network.routes_serving(&origin.id) {
            let (Some(origin_idx), Some(destination_idx)) =
                (route.index_of(&origin.id), route.index_of(&destination.id))
            else {
                continue;
            };

            if origin_idx >= destination_idx {
                continue;
            }

            let Some(bus) = nearest_bus(route, origin_idx, origin, buses) else {
                trace!(route = %route.id, "no bus before origin");
                continue;
            };

            let eta = self.leg_eta(bus, origin, destination_idx - origin_idx);

            if let Some(leg) = checked(Leg::new(
                route.clone(),
                origin.clone(),
                destination.clone(),
                bus.clone(),
                eta,
            )) {
                found.push(SuggestedRoute::direct(leg));
            }
        }

        found
    }

    /// One-change journeys: ride a route serving the origin to a shared
    /// stop, then a different route on to the destination.
    ///
    /// Both legs must travel forward, and each must have a bus that hasn't
    /// passed its boarding stop. Each (first route, transfer, second route)
    /// triple is suggested at most once.
    fn connecting_routes(
        &self,
        origin: &Arc<Stop>,
        destination: &Arc<Stop>,
        buses: &[Bus],
    ) -> Vec<SuggestedRoute> {
        let mut found = Vec::new();
        let mut seen: HashSet<(&RouteId, &StopId, &RouteId)> = HashSet::new();

        for first_route in self.network.routes_serving(&origin.id) {
            let Some(origin_idx) = first_route.index_of(&origin.id) else {
                continue;
            };

            for second_route in self.network.routes_serving(&destination.id) {
                if first_route.id == second_route.id {
                    continue;
                }

                let Some(destination_idx) = second_route.index_of(&destination.id) else {
                    continue;
                };

                for transfer_id in &first_route.stops {
                    let (Some(transfer_on_first), Some(transfer_on_second)) = (
                        first_route.index_of(transfer_id),
                        second_route.index_of(transfer_id),
                    ) else {
                        continue;
                    };

                    if origin_idx >= transfer_on_first || transfer_on_second >= destination_idx {
                        continue;
                    }

                    if !seen.insert((&first_route.id, transfer_id, &second_route.id)) {
                        continue;
                    }

                    let Some(transfer) = self.network.stop(transfer_id) else {
                        continue;
                    };

                    let Some(first_bus) = nearest_bus(first_route, origin_idx, origin, buses)
                    else {
                        continue;
                    };
                    let Some(second_bus) =
                        nearest_bus(second_route, transfer_on_second, transfer, buses)
                    else {
                        trace!(
                            route = %second_route.id,
                            transfer = %transfer.id,
                            "no bus before transfer"
                        );
                        continue;
                    };

                    let first_eta =
                        self.leg_eta(first_bus, origin, transfer_on_first - origin_idx);
                    let second_eta = self.leg_eta(
                        second_bus,
                        transfer,
                        destination_idx - transfer_on_second,
                    ) + Eta::Minutes(self.config.transfer_penalty_mins);

                    let suggestion = checked(Leg::new(
                        first_route.clone(),
                        origin.clone(),
                        transfer.clone(),
                        first_bus.clone(),
                        first_eta,
                    ))
                    .zip(checked(Leg::new(
                        second_route.clone(),
                        transfer.clone(),
                        destination.clone(),
                        second_bus.clone(),
                        second_eta,
                    )))
                    .and_then(|(first, second)| {
                        checked(SuggestedRoute::connecting(first, second))
                    });

                    if let Some(suggestion) = suggestion {
                        found.push(suggestion);
                    }
                }
            }
        }

        found
    }

    /// Routes serving both stops in either order, with the first bus found
    /// on each and no ETA.
    fn fallback_routes(
        &self,
        origin: &Arc<Stop>,
        destination: &Arc<Stop>,
        buses: &[Bus],
    ) -> Vec<SuggestedRoute> {
        self.network
            .routes_serving(&origin.id)
            .filter(|route| route.serves(&destination.id))
            .filter_map(|route| {
                let bus = buses.iter().find(|bus| bus.serves(&route.id))?;
                checked(Leg::new(
                    route.clone(),
                    origin.clone(),
                    destination.clone(),
                    bus.clone(),
                    Eta::Unavailable,
                ))
            })
            .map(SuggestedRoute::direct)
            .collect()
    }

    /// Estimate minutes until `bus` has carried a passenger `stops` stops
    /// beyond `board`.
    fn leg_eta(&self, bus: &Bus, board: &Stop, stops: usize) -> Eta {
        let approach = bus.position.distance_to(&board.position) / bus.speed;
        let raw =
            approach * self.config.distance_weight + stops as f64 * self.config.minutes_per_stop;

        Eta::from_estimate(raw) + Eta::Minutes(self.config.boarding_offset_mins)
    }
}

/// Suggest journeys from `origin` to `destination` over `network`, using
/// the given bus snapshot.
///
/// Convenience wrapper around [`RouteFinder::find`].
pub fn find_suggested_routes(
    origin: &StopId,
    destination: &StopId,
    network: &TransitNetwork,
    buses: &[Bus],
    config: &FinderConfig,
) -> Vec<SuggestedRoute> {
    RouteFinder::new(network, config).find(origin, destination, buses)
}

/// The bus on `route` nearest to `board` that hasn't passed `board_idx`.
///
/// Ties on distance go to the bus with fewer stops left to reach the
/// boarding stop, then to the earlier bus in the snapshot.
fn nearest_bus<'b>(
    route: &Route,
    board_idx: usize,
    board: &Stop,
    buses: &'b [Bus],
) -> Option<&'b Bus> {
    buses
        .iter()
        .filter(|bus| bus.serves(&route.id) && bus.can_reach(board_idx))
        .min_by(|a, b| {
            let da = a.position.distance_to(&board.position);
            let db = b.position.distance_to(&board.position);
            da.total_cmp(&db)
                .then_with(|| a.stops_until(board_idx).cmp(&b.stops_until(board_idx)))
        })
}

/// Unwrap a construction the finder guarantees by design.
///
/// A failure here is a bug in the search, not a property of the input.
fn checked<T>(result: Result<T, DomainError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            if cfg!(debug_assertions) {
                panic!("route finder built an invalid suggestion: {e}");
            }
            error!(error = %e, "route finder built an invalid suggestion");
            None
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
