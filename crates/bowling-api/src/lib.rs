//! Bowling scorekeeper HTTP API.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
