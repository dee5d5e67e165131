//! Routes for creating games, recording rolls and reading scores.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{
    Json, Router,
    routing::{get, post},
};
use bowling_core::error::DomainError;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use bowling_game::application::query_handlers::{self, GameView, ScoreView, SummaryView};
use bowling_game::application::command_handlers;
use bowling_game::domain::commands;
use bowling_game::domain::rolls::Roll;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /{game_id}/rolls.
///
/// `pins` is taken as raw JSON so that a non-integer value is reported as an
/// invalid roll rather than a body rejection.
#[derive(Debug, Deserialize)]
pub struct RecordRollRequest {
    /// Pins knocked down by this roll.
    #[serde(default)]
    pub pins: serde_json::Value,
}

/// Response body for POST /.
#[derive(Debug, Serialize)]
pub struct CreateGameResponse {
    /// Identifier of the new game.
    pub game_id: Uuid,
    /// IDs of the domain events produced and persisted.
    pub event_ids: Vec<Uuid>,
}

/// Response body for POST /{game_id}/rolls.
#[derive(Debug, Serialize)]
pub struct RecordRollResponse {
    /// IDs of the domain events produced and persisted.
    pub event_ids: Vec<Uuid>,
    /// The game's roll history including the new roll.
    pub rolls: Vec<Roll>,
}

fn pins_from_json(value: &serde_json::Value) -> Result<i64, DomainError> {
    value.as_i64().ok_or_else(|| {
        DomainError::InvalidRoll(format!("pin count must be an integer, got {value}"))
    })
}

/// POST /
#[instrument(skip(state))]
async fn create_game(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateGameResponse>), ApiError> {
    let command = commands::CreateGame {
        correlation_id: Uuid::new_v4(),
        game_id: Uuid::new_v4(),
    };

    info!(
        game_id = %command.game_id,
        correlation_id = %command.correlation_id,
        "handling create_game command"
    );

    let stored_events = command_handlers::handle_create_game(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    let event_ids = stored_events.iter().map(|e| e.event_id).collect();

    Ok((
        StatusCode::CREATED,
        Json(CreateGameResponse {
            game_id: command.game_id,
            event_ids,
        }),
    ))
}

/// POST /{game_id}/rolls
#[instrument(skip(state, request), fields(%game_id))]
async fn record_roll(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    request: Result<Json<RecordRollRequest>, JsonRejection>,
) -> Result<Json<RecordRollResponse>, ApiError> {
    let Json(request) = request.map_err(|rejection| {
        DomainError::InvalidRoll(format!(
            "request body must be a JSON object with integer `pins`: {}",
            rejection.body_text()
        ))
    })?;
    let command = commands::RecordRoll {
        correlation_id: Uuid::new_v4(),
        game_id,
        pins: pins_from_json(&request.pins)?,
    };

    info!(
        correlation_id = %command.correlation_id,
        pins = command.pins,
        "handling record_roll command"
    );

    let recorded = command_handlers::handle_record_roll(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    let event_ids = recorded.stored_events.iter().map(|e| e.event_id).collect();

    Ok(Json(RecordRollResponse {
        event_ids,
        rolls: recorded.rolls,
    }))
}

/// GET /{game_id}
#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameView>, ApiError> {
    let view = query_handlers::get_game_by_id(game_id, &*state.event_repository).await?;
    Ok(Json(view))
}

/// GET /{game_id}/score
#[instrument(skip(state))]
async fn get_score(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<ScoreView>, ApiError> {
    let view = query_handlers::get_score(game_id, &*state.event_repository).await?;
    Ok(Json(view))
}

/// GET /{game_id}/summary
#[instrument(skip(state))]
async fn get_summary(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<SummaryView>, ApiError> {
    let view = query_handlers::get_summary(
        game_id,
        &*state.event_repository,
        state.summarizer.as_ref(),
    )
    .await?;
    Ok(Json(view))
}

/// Returns the router for the games resource.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_game))
        .route("/{game_id}", get(get_game))
        .route("/{game_id}/rolls", post(record_roll))
        .route("/{game_id}/score", get(get_score))
        .route("/{game_id}/summary", get(get_summary))
}
