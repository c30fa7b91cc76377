//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::StopId;
use crate::planner::RouteFinder;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stops", get(list_stops))
        .route("/api/stops/:id", get(get_stop))
        .route("/api/routes", get(list_routes))
        .route("/api/buses", get(list_buses))
        .route("/api/suggestions", get(suggest_routes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every stop.
async fn list_stops(State(state): State<AppState>) -> Json<StopListResponse> {
    let stops = state
        .network
        .stops()
        .iter()
        .map(|s| StopResult::from_stop(s))
        .collect();

    Json(StopListResponse { stops })
}

/// A single stop and the routes serving it.
async fn get_stop(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StopDetailResponse>, AppError> {
    let stop_id = parse_stop_id("stop", &id)?;

    let stop = state
        .network
        .stop(&stop_id)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Stop {stop_id} not found"),
        })?;

    let routes = state
        .network
        .routes_serving(&stop_id)
        .map(|r| r.id.to_string())
        .collect();

    Ok(Json(StopDetailResponse {
        stop: StopResult::from_stop(stop),
        routes,
    }))
}

/// List every route.
async fn list_routes(State(state): State<AppState>) -> Json<RouteListResponse> {
    let routes = state
        .network
        .routes()
        .iter()
        .map(|r| RouteResult::from_route(r))
        .collect();

    Json(RouteListResponse { routes })
}

/// Current positions of every bus.
async fn list_buses(State(state): State<AppState>) -> Json<BusListResponse> {
    let snapshot = state.fleet.snapshot().await;

    Json(BusListResponse {
        as_of: Utc::now(),
        buses: snapshot.iter().map(BusResult::from_bus).collect(),
    })
}

/// Suggest journeys between two stops.
///
/// Unknown stops yield an empty list rather than an error.
async fn suggest_routes(
    State(state): State<AppState>,
    query: Result<Query<SuggestionRequest>, QueryRejection>,
) -> Result<Json<SuggestionResponse>, AppError> {
    let Query(req) = query?;
    let origin = parse_stop_id("origin", &req.origin)?;
    let destination = parse_stop_id("destination", &req.destination)?;

    // Search over one consistent snapshot
    let buses = state.fleet.snapshot().await;

    let finder = RouteFinder::new(&state.network, &state.config);
    let suggestions = finder.find(&origin, &destination, &buses);

    Ok(Json(SuggestionResponse::from_suggestions(&suggestions)))
}

fn parse_stop_id(field: &str, raw: &str) -> Result<StopId, AppError> {
    StopId::parse(raw.trim()).map_err(|e| AppError::BadRequest {
        message: format!("Invalid {field}: {e}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
