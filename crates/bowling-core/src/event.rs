//! Envelope shared by game creation and roll events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope fields every stored game event carries alongside its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    pub event_id: Uuid,
    /// `"GameCreated"` or `"RollRecorded"`; selects the payload decoder.
    pub event_type: String,
    /// Stream (game) this event belongs to.
    pub aggregate_id: Uuid,
    /// Position of the event within its stream, starting at 1.
    pub sequence_number: i64,
    /// Shared by all events raised for the same HTTP request.
    pub correlation_id: Uuid,
    /// The request that raised this event; currently its correlation ID.
    pub causation_id: Uuid,
    /// Taken from the handler's `Clock`.
    pub occurred_at: DateTime<Utc>,
}

/// An event in a game stream that can be persisted as a `StoredEvent`.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Matches `EventMetadata::event_type`.
    fn event_type(&self) -> &'static str;

    /// Payload without the envelope, e.g. `{"pins": 7}` for a roll.
    fn to_payload(&self) -> serde_json::Value;

    fn metadata(&self) -> &EventMetadata;
}
