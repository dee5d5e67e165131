//! Query handlers for the game context.
//!
//! This module contains query handlers that reconstitute a game from a
//! snapshot of its stored events and return read-only view DTOs. Scoring
//! runs over that snapshot, so a roll appended mid-query is never half-seen.

use bowling_core::aggregate::AggregateRoot;
use bowling_core::error::DomainError;
use bowling_core::repository::EventRepository;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::application::summarizer::{Summarizer, SummaryRequest};
use crate::domain::rolls::Roll;
use crate::domain::scoring::{Frame, ScoreResult};

/// Read-only view of a game and its roll history.
#[derive(Debug, Serialize)]
pub struct GameView {
    /// The game identifier.
    pub game_id: Uuid,
    /// Recorded rolls in order.
    pub rolls: Vec<Roll>,
    /// When the game was created.
    pub created_at: Option<DateTime<Utc>>,
    /// Current version (event count).
    pub version: i64,
}

/// Read-only view of a game's score sheet.
#[derive(Debug, Serialize)]
pub struct ScoreView {
    /// The game identifier.
    pub game_id: Uuid,
    /// Recorded rolls in order.
    pub rolls: Vec<Roll>,
    /// Highest resolved cumulative score.
    pub current_score: u16,
    /// Whether the tenth frame has closed.
    pub is_complete: bool,
    /// Started frames with labels and cumulative scores.
    pub frames: Vec<Frame>,
}

/// Read-only view of a game summary.
#[derive(Debug, Serialize)]
pub struct SummaryView {
    /// The game identifier.
    pub game_id: Uuid,
    /// Highest resolved cumulative score.
    pub current_score: u16,
    /// Free-text description of the game.
    pub summary: String,
}

/// Retrieves a game's roll history.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound` if no events exist for the ID.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_game_by_id(
    game_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<GameView, DomainError> {
    let game = command_handlers::load_game(game_id, repo).await?;

    Ok(GameView {
        game_id,
        rolls: game.history().to_vec(),
        created_at: game.created_at(),
        version: game.version(),
    })
}

/// Scores a game's recorded rolls.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound` if no events exist for the ID, and
/// `DomainError::MalformedHistory` if the stored rolls cannot be scored.
pub async fn get_score(game_id: Uuid, repo: &dyn EventRepository) -> Result<ScoreView, DomainError> {
    let game = command_handlers::load_game(game_id, repo).await?;
    let ScoreResult {
        frames,
        current_score,
        is_complete,
    } = game.score()?;

    Ok(ScoreView {
        game_id,
        rolls: game.history().to_vec(),
        current_score,
        is_complete,
        frames,
    })
}

/// Produces a free-text summary of a game via the injected summarizer.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound` for an unknown game,
/// `DomainError::MalformedHistory` for an unscorable history, and whatever
/// the summarizer reports (typically `DomainError::ExternalService`).
pub async fn get_summary(
    game_id: Uuid,
    repo: &dyn EventRepository,
    summarizer: &dyn Summarizer,
) -> Result<SummaryView, DomainError> {
    let game = command_handlers::load_game(game_id, repo).await?;
    let request = SummaryRequest {
        game_id,
        rolls: game.history().to_vec(),
        score: game.score()?,
    };

    let summary = summarizer.summarize(&request).await.inspect_err(|e| {
        warn!(%game_id, error = %e, "summary generation failed");
    })?;

    Ok(SummaryView {
        game_id,
        current_score: request.score.current_score,
        summary,
    })
}
