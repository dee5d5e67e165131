//! Aggregate root for the game context.

use bowling_core::aggregate::AggregateRoot;
use bowling_core::clock::Clock;
use bowling_core::error::DomainError;
use bowling_core::event::EventMetadata;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::events::{
    GAME_CREATED_EVENT_TYPE, GameCreated, GameEvent, GameEventKind, ROLL_RECORDED_EVENT_TYPE,
    RollRecorded,
};
use super::rolls::{Roll, validate_pin_count};
use super::scoring::{ScoreResult, ScoringEngine};

/// The aggregate root for one bowling game: its identity and roll history.
#[derive(Debug)]
pub struct Game {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// When the game was created (set after `GameCreated`).
    pub(crate) created_at: Option<DateTime<Utc>>,
    /// Rolls in the order they were recorded.
    pub(crate) rolls: Vec<Roll>,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<GameEvent>,
}

impl Game {
    /// Creates an empty, unregistered game.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            created_at: None,
            rolls: Vec::new(),
            uncommitted_events: Vec::new(),
        }
    }

    /// Returns the recorded rolls in order.
    #[must_use]
    pub fn history(&self) -> &[Roll] {
        &self.rolls
    }

    /// Returns when the game was created, once `GameCreated` has been applied.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Scores the recorded rolls.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedHistory` if the stored history breaks
    /// the rules of bowling.
    pub fn score(&self) -> Result<ScoreResult, DomainError> {
        Ok(ScoringEngine::score(&self.rolls)?)
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    fn is_registered(&self) -> bool {
        self.created_at.is_some()
            || self
                .uncommitted_events
                .iter()
                .any(|e| matches!(e.kind, GameEventKind::GameCreated(_)))
    }

    /// Applied rolls followed by rolls recorded but not yet persisted.
    fn rolls_including_uncommitted(&self) -> Vec<Roll> {
        let pending = self.uncommitted_events.iter().filter_map(|e| match &e.kind {
            GameEventKind::RollRecorded(payload) => {
                Some(Roll::new(payload.sequence_number, payload.pins))
            }
            GameEventKind::GameCreated(_) => None,
        });
        self.rolls.iter().copied().chain(pending).collect()
    }

    fn metadata(&self, event_type: &str, correlation_id: Uuid, clock: &dyn Clock) -> EventMetadata {
        EventMetadata {
            event_id: Uuid::new_v4(),
            event_type: event_type.to_owned(),
            aggregate_id: self.id,
            sequence_number: self.next_sequence_number(),
            correlation_id,
            causation_id: correlation_id,
            occurred_at: clock.now(),
        }
    }

    /// Registers the game, producing a `GameCreated` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the game already exists.
    pub fn create(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        if self.is_registered() {
            return Err(DomainError::Validation(format!(
                "game {} already exists",
                self.id
            )));
        }

        let event = GameEvent {
            metadata: self.metadata(GAME_CREATED_EVENT_TYPE, correlation_id, clock),
            kind: GameEventKind::GameCreated(GameCreated { game_id: self.id }),
        };

        self.uncommitted_events.push(event);
        Ok(())
    }

    /// Records the next roll, producing a `RollRecorded` event.
    ///
    /// The roll is checked against the pins still standing in the current
    /// frame, so a history built through this method is always scorable.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::GameNotFound` if the game was never created,
    /// `DomainError::InvalidRoll` if `pins` is outside `0..=10`, exceeds the
    /// pins standing, or the game is already complete, and
    /// `DomainError::MalformedHistory` if the existing history is unscorable.
    #[allow(clippy::cast_possible_truncation)]
    pub fn record_roll(
        &mut self,
        pins: i64,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Roll, DomainError> {
        if !self.is_registered() {
            return Err(DomainError::GameNotFound(self.id));
        }

        let pins = validate_pin_count(pins)?;
        let rolls = self.rolls_including_uncommitted();
        let scored = ScoringEngine::score(&rolls)?;

        match scored.pins_standing() {
            None => {
                return Err(DomainError::InvalidRoll(
                    "game is complete; no further rolls are allowed".to_owned(),
                ));
            }
            Some(standing) if pins > standing => {
                return Err(DomainError::InvalidRoll(format!(
                    "only {standing} pins standing, cannot knock down {pins}"
                )));
            }
            Some(_) => {}
        }

        // At most 21 rolls fit in a game, so the count always fits in u32.
        let roll = Roll::new(rolls.len() as u32 + 1, pins);

        let event = GameEvent {
            metadata: self.metadata(ROLL_RECORDED_EVENT_TYPE, correlation_id, clock),
            kind: GameEventKind::RollRecorded(RollRecorded {
                game_id: self.id,
                sequence_number: roll.sequence_number,
                pins: roll.pins,
            }),
        };

        self.uncommitted_events.push(event);
        Ok(roll)
    }
}

impl AggregateRoot for Game {
    type Event = GameEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            GameEventKind::GameCreated(_) => {
                self.created_at = Some(event.metadata.occurred_at);
            }
            GameEventKind::RollRecorded(payload) => {
                self.rolls
                    .push(Roll::new(payload.sequence_number, payload.pins));
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
