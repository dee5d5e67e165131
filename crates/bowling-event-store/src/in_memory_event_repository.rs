//! In-memory implementation of the `EventRepository` trait.
//!
//! Streams live for the lifetime of the process. Each stream has its own lock:
//! the version check and the write happen under it, so two writers can never
//! both extend the same version, and writers on different games never wait on
//! each other beyond the brief registry lookup.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use bowling_core::error::DomainError;
use bowling_core::repository::{EventRepository, StoredEvent};

type Stream = Arc<RwLock<Vec<StoredEvent>>>;

/// Process-local event repository.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    streams: RwLock<HashMap<Uuid, Stream>>,
}

impl InMemoryEventRepository {
    /// Creates an empty `InMemoryEventRepository`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of streams that hold at least one event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if a lock is poisoned.
    pub fn stream_count(&self) -> Result<usize, DomainError> {
        let streams = self.streams.read().map_err(poisoned)?;
        let mut count = 0;
        for stream in streams.values() {
            if !stream.read().map_err(poisoned)?.is_empty() {
                count += 1;
            }
        }
        Ok(count)
    }

    fn existing_stream(&self, aggregate_id: Uuid) -> Result<Option<Stream>, DomainError> {
        let streams = self.streams.read().map_err(poisoned)?;
        Ok(streams.get(&aggregate_id).map(Arc::clone))
    }

    fn stream_for_append(&self, aggregate_id: Uuid) -> Result<Stream, DomainError> {
        if let Some(stream) = self.existing_stream(aggregate_id)? {
            return Ok(stream);
        }
        let mut streams = self.streams.write().map_err(poisoned)?;
        Ok(Arc::clone(streams.entry(aggregate_id).or_default()))
    }
}

fn poisoned<T>(_: PoisonError<T>) -> DomainError {
    DomainError::Infrastructure("event store lock poisoned".into())
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        let Some(stream) = self.existing_stream(aggregate_id)? else {
            return Ok(Vec::new());
        };
        let events = stream.read().map_err(poisoned)?;
        Ok(events.clone())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        if events.is_empty() {
            return Ok(());
        }
        if let Some(stray) = events.iter().find(|e| e.aggregate_id != aggregate_id) {
            return Err(DomainError::Infrastructure(format!(
                "event {} belongs to stream {}, not {aggregate_id}",
                stray.event_id, stray.aggregate_id
            )));
        }

        let stream = self.stream_for_append(aggregate_id)?;
        let mut stored = stream.write().map_err(poisoned)?;
        let actual = i64::try_from(stored.len())
            .map_err(|e| DomainError::Infrastructure(format!("stream too long: {e}")))?;

        if actual != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }

        stored.extend_from_slice(events);
        debug!(
            %aggregate_id,
            appended = events.len(),
            version = stored.len(),
            "events appended"
        );
        Ok(())
    }
}
