//! The static transit network.
//!
//! Stops and routes are loaded once at startup and never mutated. The
//! network validates referential integrity on construction and keeps a
//! stop → routes index so the route finder doesn't rescan every route
//! per stop.

mod error;
mod file;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::domain::{Bus, Route, RouteId, Stop, StopId};

pub use error::NetworkError;
pub use file::NetworkFile;

/// Validated stops and routes.
///
/// Iteration order of stops and routes is the order they were supplied
/// in, which keeps route-finding results deterministic.
#[derive(Debug, Clone)]
pub struct TransitNetwork {
    stops: Vec<Arc<Stop>>,
    routes: Vec<Arc<Route>>,
    stop_index: HashMap<StopId, usize>,
    route_index: HashMap<RouteId, usize>,
    /// Route positions (into `routes`) serving each stop, in route order.
    routes_by_stop: HashMap<StopId, Vec<usize>>,
}

impl TransitNetwork {
    /// Build a network, rejecting duplicate IDs, dangling stop references
    /// and routes that can't be travelled.
    pub fn new(stops: Vec<Stop>, routes: Vec<Route>) -> Result<Self, NetworkError> {
        let mut stop_index = HashMap::with_capacity(stops.len());
        for (idx, stop) in stops.iter().enumerate() {
            if stop_index.insert(stop.id.clone(), idx).is_some() {
                return Err(NetworkError::DuplicateStop(stop.id.clone()));
            }
        }

        let mut route_index = HashMap::with_capacity(routes.len());
        let mut routes_by_stop: HashMap<StopId, Vec<usize>> = HashMap::new();

        for (idx, route) in routes.iter().enumerate() {
            if route_index.insert(route.id.clone(), idx).is_some() {
                return Err(NetworkError::DuplicateRoute(route.id.clone()));
            }

            if route.len() < 2 {
                return Err(NetworkError::RouteTooShort(route.id.clone()));
            }

            for stop in &route.stops {
                if !stop_index.contains_key(stop) {
                    return Err(NetworkError::UnknownStop {
                        route: route.id.clone(),
                        stop: stop.clone(),
                    });
                }

                let serving = routes_by_stop.entry(stop.clone()).or_default();
                if serving.last() != Some(&idx) {
                    serving.push(idx);
                }
            }
        }

        Ok(Self {
            stops: stops.into_iter().map(Arc::new).collect(),
            routes: routes.into_iter().map(Arc::new).collect(),
            stop_index,
            route_index,
            routes_by_stop,
        })
    }

    /// Look up a stop by ID.
    pub fn stop(&self, id: &StopId) -> Option<&Arc<Stop>> {
        self.stop_index.get(id).map(|&idx| &self.stops[idx])
    }

    /// Look up a route by ID.
    pub fn route(&self, id: &RouteId) -> Option<&Arc<Route>> {
        self.route_index.get(id).map(|&idx| &self.routes[idx])
    }

    /// All stops, in load order.
    pub fn stops(&self) -> &[Arc<Stop>] {
        &self.stops
    }

    /// All routes, in load order.
    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    /// Routes serving `stop`, in load order.
    pub fn routes_serving<'a>(
        &'a self,
        stop: &StopId,
    ) -> impl Iterator<Item = &'a Arc<Route>> + use<'a> {
        self.routes_by_stop
            .get(stop)
            .into_iter()
            .flatten()
            .map(|&idx| &self.routes[idx])
    }

    /// Check that a fleet is consistent with this network.
    pub fn validate_fleet(&self, buses: &[Bus]) -> Result<(), NetworkError> {
        let mut seen = HashSet::with_capacity(buses.len());

        for bus in buses {
            if !seen.insert(&bus.id) {
                return Err(NetworkError::DuplicateBus(bus.id.clone()));
            }

            let route = self
                .route(&bus.route_id)
                .ok_or_else(|| NetworkError::UnknownRoute {
                    bus: bus.id.clone(),
                    route: bus.route_id.clone(),
                })?;

            if bus.current_stop_index >= route.len() {
                return Err(NetworkError::StopIndexOutOfRange {
                    bus: bus.id.clone(),
                    index: bus.current_stop_index,
                    len: route.len(),
                });
            }

            if !(bus.speed.is_finite() && bus.speed > 0.0) {
                return Err(NetworkError::InvalidSpeed(bus.id.clone()));
            }

            if !(0.0..1.0).contains(&bus.progress) {
                return Err(NetworkError::InvalidProgress(bus.id.clone()));
            }
        }

        Ok(())
    }
}
