//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Bus, Eta, Leg, Position, Route, Stop, SuggestedRoute, SuggestionKind};

/// Query for route suggestions.
#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    /// Origin stop ID
    pub origin: String,

    /// Destination stop ID
    pub destination: String,
}

/// A stop.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub id: String,
    pub name: String,
    pub position: Position,
}

/// A route and its stops in travel order.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub id: String,
    pub name: String,
    pub stops: Vec<String>,
}

/// A bus and where it is.
#[derive(Debug, Serialize)]
pub struct BusResult {
    pub id: String,
    pub route_id: String,
    pub current_stop_index: usize,
    pub progress: f64,
    pub speed: f64,
    pub position: Position,
}

/// Response listing all stops.
#[derive(Debug, Serialize)]
pub struct StopListResponse {
    pub stops: Vec<StopResult>,
}

/// Response for a single stop.
#[derive(Debug, Serialize)]
pub struct StopDetailResponse {
    pub stop: StopResult,

    /// IDs of routes serving the stop
    pub routes: Vec<String>,
}

/// Response listing all routes.
#[derive(Debug, Serialize)]
pub struct RouteListResponse {
    pub routes: Vec<RouteResult>,
}

/// Response with the current fleet.
#[derive(Debug, Serialize)]
pub struct BusListResponse {
    /// When the snapshot was taken
    pub as_of: DateTime<Utc>,

    pub buses: Vec<BusResult>,
}

/// One leg of a suggestion.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub route_id: String,
    pub route_name: String,
    pub start_stop: StopResult,
    pub end_stop: StopResult,
    pub bus_id: String,

    /// Minutes until arrival at `end_stop`, -1 if unknown
    pub eta: Eta,
}

/// A suggested journey.
#[derive(Debug, Serialize)]
pub struct SuggestionResult {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,

    /// Sum of leg ETAs, -1 if any leg is unknown
    pub total_eta: Eta,

    pub legs: Vec<LegResult>,
}

/// Response for route suggestions.
#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    /// Suggestions, best first
    pub suggestions: Vec<SuggestionResult>,

    /// Route to highlight on the map: the best suggestion's first route
    pub highlighted_route: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl StopResult {
    /// Create from a domain Stop.
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            id: stop.id.to_string(),
            name: stop.name.clone(),
            position: stop.position,
        }
    }
}

impl RouteResult {
    /// Create from a domain Route.
    pub fn from_route(route: &Route) -> Self {
        Self {
            id: route.id.to_string(),
            name: route.name.clone(),
            stops: route.stops.iter().map(ToString::to_string).collect(),
        }
    }
}

impl BusResult {
    /// Create from a domain Bus.
    pub fn from_bus(bus: &Bus) -> Self {
        Self {
            id: bus.id.to_string(),
            route_id: bus.route_id.to_string(),
            current_stop_index: bus.current_stop_index,
            progress: bus.progress,
            speed: bus.speed,
            position: bus.position,
        }
    }
}

impl LegResult {
    /// Create from a domain Leg.
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            route_id: leg.route().id.to_string(),
            route_name: leg.route().name.clone(),
            start_stop: StopResult::from_stop(leg.start_stop()),
            end_stop: StopResult::from_stop(leg.end_stop()),
            bus_id: leg.bus().id.to_string(),
            eta: leg.eta(),
        }
    }
}

impl SuggestionResult {
    /// Create from a domain SuggestedRoute.
    pub fn from_suggestion(suggestion: &SuggestedRoute) -> Self {
        Self {
            kind: suggestion.kind(),
            total_eta: suggestion.total_eta(),
            legs: suggestion.legs().iter().map(LegResult::from_leg).collect(),
        }
    }
}

impl SuggestionResponse {
    /// Create from ranked suggestions.
    pub fn from_suggestions(suggestions: &[SuggestedRoute]) -> Self {
        Self {
            highlighted_route: suggestions
                .first()
                .map(|s| s.first_leg().route().id.to_string()),
            suggestions: suggestions
                .iter()
                .map(SuggestionResult::from_suggestion)
                .collect(),
        }
    }
}
