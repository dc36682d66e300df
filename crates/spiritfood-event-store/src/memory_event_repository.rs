//! In-memory implementation of the `EventRepository` trait.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use spiritfood_core::error::DomainError;
use spiritfood_core::repository::{EventRepository, StoredEvent};
use tracing::{debug, info};
use uuid::Uuid;

/// Number of attempt streams kept when no explicit limit is given.
pub const DEFAULT_MAX_STREAMS: usize = 10_000;

#[derive(Debug, Default)]
struct Streams {
    by_id: HashMap<Uuid, Vec<StoredEvent>>,
    /// Stream ids, oldest first.
    created: VecDeque<Uuid>,
}

/// Event streams keyed by aggregate id, guarded by a single mutex.
///
/// Memory is bounded: at most `max_streams` streams are held. Opening a new
/// stream beyond that evicts the oldest one, after which its aggregate loads
/// as empty. Nothing survives a process restart.
#[derive(Debug)]
pub struct InMemoryEventRepository {
    streams: Mutex<Streams>,
    max_streams: usize,
}

impl Default for InMemoryEventRepository {
    fn default() -> Self {
        Self::with_max_streams(DEFAULT_MAX_STREAMS)
    }
}

impl InMemoryEventRepository {
    /// Creates an empty repository holding up to [`DEFAULT_MAX_STREAMS`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty repository holding up to `max_streams` streams.
    /// A limit of 0 is treated as 1.
    #[must_use]
    pub fn with_max_streams(max_streams: usize) -> Self {
        Self {
            streams: Mutex::new(Streams::default()),
            max_streams: max_streams.max(1),
        }
    }

    /// Number of streams currently held.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the lock is poisoned.
    pub fn stream_count(&self) -> Result<usize, DomainError> {
        Ok(self.streams()?.by_id.len())
    }

    fn streams(&self) -> Result<MutexGuard<'_, Streams>, DomainError> {
        self.streams
            .lock()
            .map_err(|_| DomainError::Infrastructure("event store lock poisoned".to_owned()))
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        let streams = self.streams()?;
        Ok(streams.by_id.get(&aggregate_id).cloned().unwrap_or_default())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        if let Some(stray) = events.iter().find(|e| e.aggregate_id != aggregate_id) {
            return Err(DomainError::Infrastructure(format!(
                "event {} belongs to aggregate {}, not {aggregate_id}",
                stray.event_id, stray.aggregate_id
            )));
        }

        let mut streams = self.streams()?;
        let current = streams.by_id.get(&aggregate_id).map_or(0, Vec::len);
        let actual = i64::try_from(current)
            .map_err(|_| DomainError::Infrastructure("event stream too long".to_owned()))?;
        if actual != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }

        if !streams.by_id.contains_key(&aggregate_id) {
            if events.is_empty() {
                return Ok(());
            }
            while streams.by_id.len() >= self.max_streams {
                let Some(oldest) = streams.created.pop_front() else {
                    break;
                };
                streams.by_id.remove(&oldest);
                info!(aggregate_id = %oldest, "evicted oldest event stream");
            }
            streams.created.push_back(aggregate_id);
        }

        let stream = streams.by_id.entry(aggregate_id).or_default();
        stream.extend_from_slice(events);
        debug!(%aggregate_id, appended = events.len(), version = stream.len(), "events appended");
        Ok(())
    }
}
