//! Command handlers for the game context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load aggregate, execute command, persist events.

use bowling_core::aggregate::AggregateRoot;
use bowling_core::clock::Clock;
use bowling_core::command::Command;
use bowling_core::error::DomainError;
use bowling_core::event::{DomainEvent, EventMetadata};
use bowling_core::repository::{EventRepository, StoredEvent};
use tracing::debug;
use uuid::Uuid;

use crate::domain::aggregates::Game;
use crate::domain::commands::{CreateGame, RecordRoll};
use crate::domain::events::{GameEvent, GameEventKind};
use crate::domain::rolls::Roll;

fn to_stored_event(event: &GameEvent) -> StoredEvent {
    let meta = event.metadata();
    StoredEvent {
        event_id: meta.event_id,
        aggregate_id: meta.aggregate_id,
        event_type: event.event_type().to_owned(),
        payload: event.to_payload(),
        sequence_number: meta.sequence_number,
        correlation_id: meta.correlation_id,
        causation_id: meta.causation_id,
        occurred_at: meta.occurred_at,
    }
}

/// Reconstitutes a `Game` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub(crate) fn reconstitute(
    game_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<Game, DomainError> {
    let mut game = Game::new(game_id);
    for stored in existing_events {
        let kind: GameEventKind = serde_json::from_value(stored.payload.clone()).map_err(|e| {
            DomainError::Infrastructure(format!("event deserialization failed: {e}"))
        })?;
        let event = GameEvent {
            metadata: EventMetadata {
                event_id: stored.event_id,
                event_type: stored.event_type.clone(),
                aggregate_id: stored.aggregate_id,
                sequence_number: stored.sequence_number,
                correlation_id: stored.correlation_id,
                causation_id: stored.causation_id,
                occurred_at: stored.occurred_at,
            },
            kind,
        };
        game.apply(&event);
    }
    Ok(game)
}

/// Loads a game, treating an empty event stream as an unknown game.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound` if no events exist for the ID, or any
/// error from loading and reconstitution.
pub(crate) async fn load_game(
    game_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<Game, DomainError> {
    let stored_events = repo.load_events(game_id).await?;
    if stored_events.is_empty() {
        return Err(DomainError::GameNotFound(game_id));
    }
    reconstitute(game_id, &stored_events)
}

/// Outcome of a successfully recorded roll.
#[derive(Debug, Clone)]
pub struct RecordedRoll {
    /// Events produced and persisted.
    pub stored_events: Vec<StoredEvent>,
    /// The game's roll history including the new roll.
    pub rolls: Vec<Roll>,
}

/// Handles the `CreateGame` command: registers the game under the command's
/// identifier and persists the `GameCreated` event.
///
/// # Errors
///
/// Returns `DomainError` if event loading, validation, or appending fails.
pub async fn handle_create_game(
    command: &CreateGame,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let existing_events = repo.load_events(command.game_id).await?;
    let mut game = reconstitute(command.game_id, &existing_events)?;

    game.create(command.correlation_id, clock)?;

    let stored_events: Vec<StoredEvent> = game
        .uncommitted_events()
        .iter()
        .map(to_stored_event)
        .collect();

    repo.append_events(command.game_id, game.version(), &stored_events)
        .await?;

    debug!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        game_id = %command.game_id(),
        "game registered"
    );
    Ok(stored_events)
}

/// Handles the `RecordRoll` command: reconstitutes the game, validates and
/// records the roll, and persists the resulting event.
///
/// The append is made against the version the roll was validated on, so a
/// concurrent roll on the same game surfaces as a concurrency conflict
/// instead of an unchecked history.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound` for an unknown game,
/// `DomainError::InvalidRoll` for a rejected roll, or any error from loading
/// and appending.
pub async fn handle_record_roll(
    command: &RecordRoll,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<RecordedRoll, DomainError> {
    let mut game = load_game(command.game_id, repo).await?;

    let roll = game.record_roll(command.pins, command.correlation_id, clock)?;

    let stored_events: Vec<StoredEvent> = game
        .uncommitted_events()
        .iter()
        .map(to_stored_event)
        .collect();

    repo.append_events(command.game_id, game.version(), &stored_events)
        .await?;

    debug!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        game_id = %command.game_id(),
        sequence_number = roll.sequence_number,
        pins = roll.pins,
        "roll recorded"
    );

    let mut rolls = game.history().to_vec();
    rolls.push(roll);

    Ok(RecordedRoll {
        stored_events,
        rolls,
    })
}
