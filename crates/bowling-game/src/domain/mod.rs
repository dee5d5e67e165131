//! Domain model for the game context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod rolls;
pub mod scoring;
