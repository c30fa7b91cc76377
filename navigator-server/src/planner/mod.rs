//! Route suggestions.
//!
//! This module implements the route finder that answers: "which buses
//! get me from this stop to that one, and roughly when?"
//!
//! Candidates come from three searches: direct rides, rides with one
//! change, and (only when both come up empty) a fallback listing routes
//! that serve both stops without a usable ETA. Candidates are then ranked
//! and capped.

mod config;
mod rank;
mod search;

pub use config::FinderConfig;
pub use rank::rank_suggestions;
pub use search::{RouteFinder, find_suggested_routes};
