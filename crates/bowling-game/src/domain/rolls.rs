//! Roll value type.

use bowling_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Number of pins set up at the start of every frame.
pub const PINS_PER_FRAME: u8 = 10;

/// A single delivery: how many pins fell, and where it sits in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    /// 1-based position of the roll in the game, assigned on append.
    pub sequence_number: u32,
    /// Pins knocked down, in `0..=10`.
    pub pins: u8,
}

impl Roll {
    /// Creates a roll.
    #[must_use]
    pub fn new(sequence_number: u32, pins: u8) -> Self {
        Self {
            sequence_number,
            pins,
        }
    }

    /// Builds a numbered roll history from bare pin counts.
    #[must_use]
    pub fn sequence(pins: &[u8]) -> Vec<Self> {
        (1..)
            .zip(pins)
            .map(|(sequence_number, &pins)| Self::new(sequence_number, pins))
            .collect()
    }
}

/// Checks that a raw pin count is a whole number of pins a single ball can
/// knock down.
///
/// # Errors
///
/// Returns `DomainError::InvalidRoll` if `pins` is outside `0..=10`.
pub fn validate_pin_count(pins: i64) -> Result<u8, DomainError> {
    u8::try_from(pins)
        .ok()
        .filter(|p| *p <= PINS_PER_FRAME)
        .ok_or_else(|| {
            DomainError::InvalidRoll(format!(
                "pin count must be between 0 and {PINS_PER_FRAME}, got {pins}"
            ))
        })
}
