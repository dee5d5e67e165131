//! Domain events for the game context.

use bowling_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Emitted when a new game is registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCreated {
    /// The game identifier.
    pub game_id: Uuid,
}

/// Emitted when a roll is appended to a game's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRecorded {
    /// The game identifier.
    pub game_id: Uuid,
    /// 1-based position of the roll in the game.
    pub sequence_number: u32,
    /// Pins knocked down.
    pub pins: u8,
}

/// Event type identifier for [`GameCreated`].
pub const GAME_CREATED_EVENT_TYPE: &str = "game.created";

/// Event type identifier for [`RollRecorded`].
pub const ROLL_RECORDED_EVENT_TYPE: &str = "game.roll_recorded";

/// Event payload variants for the game context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventKind {
    /// A game has been created.
    GameCreated(GameCreated),
    /// A roll has been recorded.
    RollRecorded(RollRecorded),
}

/// Domain event envelope for the game context.
#[derive(Debug, Clone)]
pub struct GameEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: GameEventKind,
}

impl DomainEvent for GameEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            GameEventKind::GameCreated(_) => GAME_CREATED_EVENT_TYPE,
            GameEventKind::RollRecorded(_) => ROLL_RECORDED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("GameEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
