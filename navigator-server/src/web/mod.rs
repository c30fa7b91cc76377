//! Web layer for the bus navigator.
//!
//! Provides HTTP endpoints for the network, the live fleet and route
//! suggestions.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
