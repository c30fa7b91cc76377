//! Domain types for the bus navigator.
//!
//! This module contains the core domain model: identifiers, stops, routes,
//! buses and the journey suggestions built from them. Suggestion types
//! enforce their invariants at construction time, so code that receives
//! them can trust their validity.

mod bus;
mod error;
mod eta;
mod ids;
mod position;
mod route;
mod stop;
mod suggestion;

pub use bus::Bus;
pub use error::DomainError;
pub use eta::Eta;
pub use ids::{BusId, InvalidId, RouteId, StopId};
pub use position::Position;
pub use route::Route;
pub use stop::Stop;
pub use suggestion::{Leg, SuggestedRoute, SuggestionKind};
