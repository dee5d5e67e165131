//! Natural-language summary port.
//!
//! Summaries are produced by an injected `Summarizer`. The scoring core never
//! depends on one being reachable: a failed summary is reported to the
//! caller and leaves the game untouched.

use std::fmt::Write as _;

use async_trait::async_trait;
use bowling_core::error::DomainError;
use uuid::Uuid;

use crate::domain::rolls::Roll;
use crate::domain::scoring::{FrameLabel, FrameScore, ScoreResult};

/// Everything a summarizer needs to describe a game.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    /// The game being summarized.
    pub game_id: Uuid,
    /// Recorded rolls in order.
    pub rolls: Vec<Roll>,
    /// Scoring pass over `rolls`.
    pub score: ScoreResult,
}

/// Produces free text describing a game's progress.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarizes the game.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ExternalService` if the backing service fails.
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, DomainError>;
}

/// Renders one line per frame, e.g. `Frame 1: Spare [5, 5] = 13`.
#[must_use]
pub fn frame_breakdown(score: &ScoreResult) -> String {
    let mut out = String::new();
    for frame in &score.frames {
        let total = match frame.score {
            FrameScore::Resolved(total) => total.to_string(),
            FrameScore::Pending => "pending".to_owned(),
        };
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "Frame {}: {} {:?} = {}",
            frame.number, frame.label, frame.rolls, total
        );
    }
    out
}

/// Local summarizer that describes the score sheet without any network
/// access. Used when no summary service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreSheetSummarizer;

#[async_trait]
impl Summarizer for ScoreSheetSummarizer {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, DomainError> {
        let score = &request.score;
        if request.rolls.is_empty() {
            return Ok("No rolls have been recorded yet.".to_owned());
        }

        let strikes = score
            .frames
            .iter()
            .filter(|f| f.label == FrameLabel::Strike)
            .count();
        let spares = score
            .frames
            .iter()
            .filter(|f| f.label == FrameLabel::Spare)
            .count();

        let status = if score.is_complete {
            format!("Final score: {}.", score.current_score)
        } else {
            format!(
                "Score so far: {} after {} roll(s) across {} frame(s).",
                score.current_score,
                request.rolls.len(),
                score.frames.len()
            )
        };

        Ok(format!(
            "{status} Strikes: {strikes}. Spares: {spares}.\n{}",
            frame_breakdown(score)
        ))
    }
}
