//! Shared application state.

use std::sync::Arc;

use bowling_core::clock::Clock;
use bowling_core::repository::EventRepository;
use bowling_game::application::summarizer::Summarizer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for deterministic timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Event repository holding every game's stream.
    pub event_repository: Arc<dyn EventRepository>,
    /// Produces free-text game summaries.
    pub summarizer: Arc<dyn Summarizer>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        event_repository: Arc<dyn EventRepository>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            clock,
            event_repository,
            summarizer,
        }
    }
}
