//! Commands for the game context.

use bowling_core::command::Command;
use uuid::Uuid;

/// Command to register a new, empty game.
#[derive(Debug, Clone)]
pub struct CreateGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Identifier the new game will be registered under.
    pub game_id: Uuid,
}

impl Command for CreateGame {
    fn command_type(&self) -> &'static str {
        "game.create_game"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn game_id(&self) -> Uuid {
        self.game_id
    }
}

/// Command to record the next roll of a game.
#[derive(Debug, Clone)]
pub struct RecordRoll {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game to record the roll in.
    pub game_id: Uuid,
    /// Pins knocked down, as submitted. Range-checked by the aggregate.
    pub pins: i64,
}

impl Command for RecordRoll {
    fn command_type(&self) -> &'static str {
        "game.record_roll"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn game_id(&self) -> Uuid {
        self.game_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_expose_target_game_and_log_name() {
        let game_id = Uuid::new_v4();
        let create = CreateGame {
            correlation_id: Uuid::new_v4(),
            game_id,
        };
        let roll = RecordRoll {
            correlation_id: Uuid::new_v4(),
            game_id,
            pins: 10,
        };

        assert_eq!(create.game_id(), game_id);
        assert_eq!(roll.game_id(), game_id);
        assert_eq!(create.command_type(), "game.create_game");
        assert_eq!(roll.command_type(), "game.record_roll");
        assert_eq!(roll.correlation_id(), roll.correlation_id);
    }
}
