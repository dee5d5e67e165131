//! State rebuilt from a game's event stream.

use uuid::Uuid;

use crate::event::DomainEvent;

/// A consistency boundary whose state is the fold of its stored events.
///
/// For a bowling game the stream is one creation event followed by one
/// event per recorded roll, so `version` is `1 + rolls` once created.
pub trait AggregateRoot: Send + Sync {
    type Event: DomainEvent;

    fn aggregate_id(&self) -> Uuid;

    /// Count of events folded in, persisted or not. Used as the expected
    /// stream length on append.
    fn version(&self) -> i64;

    /// Replays one event. Must not fail: validation happens before the
    /// event is raised.
    fn apply(&mut self, event: &Self::Event);

    /// Events raised since the last successful append.
    fn uncommitted_events(&self) -> &[Self::Event];

    fn clear_uncommitted_events(&mut self);
}
