//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type shared by the game context and its adapters.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No game exists with the given identifier.
    #[error("game not found: {0}")]
    GameNotFound(Uuid),

    /// A roll was rejected before it reached the game's history.
    #[error("invalid roll: {0}")]
    InvalidRoll(String),

    /// A recorded roll history violates the rules of bowling.
    #[error("malformed roll history: {0}")]
    MalformedHistory(String),

    /// Optimistic concurrency conflict.
    #[error(
        "concurrency conflict on game {aggregate_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        /// The game stream that had the conflict.
        aggregate_id: Uuid,
        /// The version the writer expected.
        expected: i64,
        /// The version found in the store.
        actual: i64,
    },

    /// A request failed validation before reaching domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An external collaborator (such as the summary service) failed.
    #[error("external service error: {0}")]
    ExternalService(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
