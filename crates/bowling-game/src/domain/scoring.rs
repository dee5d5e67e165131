//! Scoring engine.
//!
//! Converts a flat roll history into ten frames, applying strike and spare
//! bonus lookahead and the tenth-frame fill-ball rules. Scoring is a pure
//! function over a snapshot of the history: it never mutates its input and
//! returns identical results for identical histories.

use std::fmt;

use bowling_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

use super::rolls::{PINS_PER_FRAME, Roll};

/// Number of frames in a game.
pub const FRAMES_PER_GAME: u8 = 10;

/// A roll history that cannot have come from a legal game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// A single roll knocked down more than ten pins.
    #[error("roll {sequence_number} knocks down {pins} pins, more than the {PINS_PER_FRAME} set up")]
    PinCountOutOfRange {
        /// Position of the offending roll.
        sequence_number: u32,
        /// Pins it claims to have knocked down.
        pins: u8,
    },

    /// Two balls of one frame knocked down more pins than were standing.
    #[error("frame {frame} knocks down {total} pins, more than the {PINS_PER_FRAME} standing")]
    FrameOverflow {
        /// 1-based frame number.
        frame: u8,
        /// Pins knocked down across the offending balls.
        total: u16,
    },

    /// Rolls were recorded after the tenth frame closed.
    #[error("{count} roll(s) recorded after the game was complete")]
    RollsAfterGameComplete {
        /// Number of surplus rolls.
        count: usize,
    },
}

impl From<ScoringError> for DomainError {
    fn from(err: ScoringError) -> Self {
        DomainError::MalformedHistory(err.to_string())
    }
}

/// Classification of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FrameLabel {
    /// All ten pins on the first ball.
    Strike,
    /// All ten pins across two balls.
    Spare,
    /// Pins left standing after two balls.
    #[serde(rename = "Open frame")]
    OpenFrame,
    /// The frame's own balls have not all been bowled yet.
    Incomplete,
}

impl fmt::Display for FrameLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Strike => "Strike",
            Self::Spare => "Spare",
            Self::OpenFrame => "Open frame",
            Self::Incomplete => "Incomplete",
        };
        f.write_str(label)
    }
}

/// Cumulative score of a frame.
///
/// A frame stays `Pending` until its own balls and any bonus balls have been
/// bowled, and so does every frame after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum FrameScore {
    /// Running total through this frame.
    Resolved(u16),
    /// Waiting on rolls that have not been recorded.
    Pending,
}

impl FrameScore {
    /// Returns the running total, if resolved.
    #[must_use]
    pub fn value(self) -> Option<u16> {
        match self {
            Self::Resolved(total) => Some(total),
            Self::Pending => None,
        }
    }
}

/// One scored frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// 1-based frame number.
    #[serde(rename = "frame")]
    pub number: u8,
    /// Pins knocked down by each of the frame's own balls so far.
    pub rolls: Vec<u8>,
    /// Strike, spare, open or incomplete.
    pub label: FrameLabel,
    /// Cumulative score through this frame.
    pub score: FrameScore,
}

/// Output of one scoring pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    /// Frames that have at least one roll, in order.
    pub frames: Vec<Frame>,
    /// Highest resolved cumulative score, or 0 when nothing has resolved.
    pub current_score: u16,
    /// Whether the tenth frame has been closed.
    pub is_complete: bool,
}

impl ScoreResult {
    /// Returns the frame with the given 1-based number, if it has started.
    #[must_use]
    pub fn frame(&self, number: u8) -> Option<&Frame> {
        self.frames.iter().find(|f| f.number == number)
    }

    /// Returns how many pins the next ball may knock down, or `None` once
    /// the game is complete.
    #[must_use]
    pub fn pins_standing(&self) -> Option<u8> {
        if self.is_complete {
            return None;
        }

        let Some(last) = self.frames.last() else {
            return Some(PINS_PER_FRAME);
        };

        match (last.number, last.rolls.as_slice()) {
            (FRAMES_PER_GAME, [first, second]) if *first == PINS_PER_FRAME => {
                if *second == PINS_PER_FRAME {
                    Some(PINS_PER_FRAME)
                } else {
                    Some(PINS_PER_FRAME - second)
                }
            }
            (_, [first]) if *first < PINS_PER_FRAME => Some(PINS_PER_FRAME - first),
            _ => Some(PINS_PER_FRAME),
        }
    }
}

/// Stateless scorer for roll histories.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    /// Scores a roll history.
    ///
    /// Rolls are consumed in the order given; sequence numbers are only used
    /// to identify rolls in error messages.
    ///
    /// # Errors
    ///
    /// Returns a `ScoringError` if the history could not have come from a
    /// legal game.
    pub fn score(rolls: &[Roll]) -> Result<ScoreResult, ScoringError> {
        if let Some(roll) = rolls.iter().find(|r| r.pins > PINS_PER_FRAME) {
            return Err(ScoringError::PinCountOutOfRange {
                sequence_number: roll.sequence_number,
                pins: roll.pins,
            });
        }

        let pins: Vec<u8> = rolls.iter().map(|r| r.pins).collect();
        let mut frames = Vec::with_capacity(usize::from(FRAMES_PER_GAME));
        let mut cursor = 0;
        let mut running = Some(0_u16);
        let mut current_score = 0;
        let mut is_complete = false;

        for number in 1..=FRAMES_PER_GAME {
            if cursor >= pins.len() {
                break;
            }

            let partition = if number < FRAMES_PER_GAME {
                regular_frame(&pins, cursor, number)?
            } else {
                tenth_frame(&pins[cursor..])?
            };
            cursor += partition.rolls.len();

            // Once a frame is pending, every later total is unknown too.
            running = running
                .zip(partition.contribution)
                .map(|(total, contribution)| total + contribution);
            let score = match running {
                Some(total) => {
                    current_score = total;
                    FrameScore::Resolved(total)
                }
                None => FrameScore::Pending,
            };

            if number == FRAMES_PER_GAME {
                is_complete = partition.closed;
            }

            frames.push(Frame {
                number,
                rolls: partition.rolls,
                label: partition.label,
                score,
            });
        }

        if cursor < pins.len() {
            return Err(ScoringError::RollsAfterGameComplete {
                count: pins.len() - cursor,
            });
        }

        Ok(ScoreResult {
            frames,
            current_score,
            is_complete,
        })
    }
}

/// The balls belonging to one frame and what they are worth.
struct Partition {
    rolls: Vec<u8>,
    label: FrameLabel,
    contribution: Option<u16>,
    closed: bool,
}

/// Sums `count` rolls starting at `from`, or `None` if they are not all
/// recorded yet.
fn lookahead(pins: &[u8], from: usize, count: usize) -> Option<u16> {
    let bonus = pins.get(from..from + count)?;
    Some(bonus.iter().map(|&p| u16::from(p)).sum())
}

fn regular_frame(pins: &[u8], cursor: usize, number: u8) -> Result<Partition, ScoringError> {
    let ten = u16::from(PINS_PER_FRAME);
    let first = pins[cursor];

    if first == PINS_PER_FRAME {
        return Ok(Partition {
            rolls: vec![first],
            label: FrameLabel::Strike,
            contribution: lookahead(pins, cursor + 1, 2).map(|bonus| ten + bonus),
            closed: true,
        });
    }

    let Some(&second) = pins.get(cursor + 1) else {
        return Ok(Partition {
            rolls: vec![first],
            label: FrameLabel::Incomplete,
            contribution: None,
            closed: false,
        });
    };

    let total = u16::from(first) + u16::from(second);
    if total > ten {
        return Err(ScoringError::FrameOverflow {
            frame: number,
            total,
        });
    }

    let (label, contribution) = if total == ten {
        (
            FrameLabel::Spare,
            lookahead(pins, cursor + 2, 1).map(|bonus| ten + bonus),
        )
    } else {
        (FrameLabel::OpenFrame, Some(total))
    };

    Ok(Partition {
        rolls: vec![first, second],
        label,
        contribution,
        closed: true,
    })
}

fn tenth_frame(remaining: &[u8]) -> Result<Partition, ScoringError> {
    let ten = u16::from(PINS_PER_FRAME);
    let first = remaining[0];
    let second = remaining.get(1).copied();
    let strike = first == PINS_PER_FRAME;

    if let Some(second) = second {
        let total = u16::from(first) + u16::from(second);
        if !strike && total > ten {
            return Err(ScoringError::FrameOverflow {
                frame: FRAMES_PER_GAME,
                total,
            });
        }
    }

    let spare =
        !strike && second.is_some_and(|second| u16::from(first) + u16::from(second) == ten);
    // A strike or spare earns a fill ball; an open tenth closes after two.
    let needed = if strike || spare { 3 } else { 2 };
    let rolls: Vec<u8> = remaining.iter().take(needed).copied().collect();

    if let [_, second, third] = rolls.as_slice() {
        // After a strike, a non-strike second ball leaves pins for the third.
        let total = u16::from(*second) + u16::from(*third);
        if strike && *second < PINS_PER_FRAME && total > ten {
            return Err(ScoringError::FrameOverflow {
                frame: FRAMES_PER_GAME,
                total,
            });
        }
    }

    let closed = rolls.len() == needed;
    let label = if strike {
        FrameLabel::Strike
    } else if spare {
        FrameLabel::Spare
    } else if rolls.len() >= 2 {
        FrameLabel::OpenFrame
    } else {
        FrameLabel::Incomplete
    };
    let contribution = closed.then(|| rolls.iter().map(|&p| u16::from(p)).sum());

    Ok(Partition {
        rolls,
        label,
        contribution,
        closed,
    })
}
