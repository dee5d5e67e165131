//! Event store implementations for the bowling scorer.

pub mod in_memory_event_repository;
