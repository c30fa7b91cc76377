//! Bus movement simulation.
//!
//! Buses creep along their routes a little every tick, interpolating
//! their position between the stop they last passed and the next one.
//! After the last stop a bus wraps around to the start of its route.
//!
//! The simulation owns the only mutable state in the server. Route
//! finding never sees it directly: handlers take a [`Fleet::snapshot`]
//! and search over that.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::domain::Bus;
use crate::network::TransitNetwork;

/// Simulation parameters.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Wall-clock time between ticks.
    pub tick_interval: Duration,

    /// Fraction of a bus's speed applied per tick.
    pub progress_scale: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            progress_scale: 0.1,
        }
    }
}

/// Compute the state of `bus` one tick later.
///
/// Buses whose route or stops can't be resolved stay where they are.
pub fn advance(network: &TransitNetwork, bus: &Bus, progress_scale: f64) -> Bus {
    let Some(route) = network.route(&bus.route_id) else {
        trace!(bus = %bus.id, route = %bus.route_id, "bus on unknown route");
        return bus.clone();
    };

    let mut index = bus.current_stop_index;
    let mut progress = bus.progress + bus.speed * progress_scale;

    if progress >= 1.0 {
        progress = 0.0;
        match route.next_index(index) {
            Some(next) => index = next,
            None => return bus.clone(),
        }
    }

    let from = route.stops.get(index).and_then(|id| network.stop(id));
    let to = route
        .next_index(index)
        .and_then(|next| route.stops.get(next))
        .and_then(|id| network.stop(id));

    let (Some(from), Some(to)) = (from, to) else {
        return bus.clone();
    };

    Bus {
        current_stop_index: index,
        progress,
        position: from.position.lerp(&to.position, progress),
        ..bus.clone()
    }
}

/// Thread-safe bus fleet.
///
/// Cloning is cheap; all clones share the same buses.
#[derive(Clone)]
pub struct Fleet {
    inner: Arc<RwLock<Vec<Bus>>>,
}

impl Fleet {
    /// Create a fleet from its initial bus states.
    pub fn new(buses: Vec<Bus>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(buses)),
        }
    }

    /// A consistent copy of every bus, for a single query.
    pub async fn snapshot(&self) -> Vec<Bus> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// Advance every bus by one tick.
    pub async fn tick(&self, network: &TransitNetwork, config: &SimulationConfig) {
        let mut guard = self.inner.write().await;
        for bus in guard.iter_mut() {
            *bus = advance(network, bus, config.progress_scale);
        }
    }

    /// Get the number of buses in the fleet.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    /// Check if the fleet is empty.
    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }
}

/// Tick `fleet` forever at the configured interval.
///
/// Meant to be spawned as a background task.
pub async fn run(fleet: Fleet, network: Arc<TransitNetwork>, config: SimulationConfig) {
    let mut interval = tokio::time::interval(config.tick_interval);
    interval.tick().await; // First tick is immediate, skip it

    loop {
        interval.tick().await;
        fleet.tick(&network, &config).await;
        debug!("simulation tick");
    }
}
