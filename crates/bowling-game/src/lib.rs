//! Game bounded context: scoring engine, aggregate and application services.
//!
//! Responsible for recording the rolls of a game, validating them against
//! the pins still standing, and computing the frame-by-frame score with
//! strike and spare bonus lookahead.

pub mod application;
pub mod domain;
