//! Shared test doubles for the bowling scorekeeper.

mod clock;
mod repository;

pub use clock::FixedClock;
pub use repository::{
    ConflictingEventRepository, EmptyEventRepository, FailingEventRepository,
    RecordingEventRepository,
};
