//! Application state for the web layer.

use std::sync::Arc;

use crate::network::TransitNetwork;
use crate::planner::FinderConfig;
use crate::simulation::Fleet;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Static stops and routes
    pub network: Arc<TransitNetwork>,

    /// Live bus positions
    pub fleet: Fleet,

    /// Route finder configuration
    pub config: Arc<FinderConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: Arc<TransitNetwork>, fleet: Fleet, config: FinderConfig) -> Self {
        Self {
            network,
            fleet,
            config: Arc::new(config),
        }
    }
}
