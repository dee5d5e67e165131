//! Requests that change a game.

use uuid::Uuid;

/// A request to change one game, such as opening it or recording a roll.
///
/// Every command targets exactly one game stream, so handlers can log and
/// lock by `game_id` without knowing the concrete command.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted name used in logs, e.g. `game.record_roll`.
    fn command_type(&self) -> &'static str;

    /// Identifier shared by the command and every roll event it produces.
    fn correlation_id(&self) -> Uuid;

    /// The game whose event stream this command appends to.
    fn game_id(&self) -> Uuid;
}
