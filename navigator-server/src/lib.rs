//! Bus navigator server.
//!
//! A web service that answers: "which bus gets me from this stop to
//! that one, and when does it get there?" over a small simulated
//! transit network.

pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod simulation;
pub mod web;
