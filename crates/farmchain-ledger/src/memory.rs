use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use farmchain_crypto::{ChainEntry, ContentHasher};
use farmchain_registry::{BatchDirectory, RegistryError};
use farmchain_types::{BatchId, BatchStatus, RecordId};

use crate::error::LedgerError;
use crate::records::{LedgerRecord, RecordDraft, RecordRef};
use crate::schema;
use crate::traits::{LedgerReader, LedgerWriter};

/// In-memory ledger engine for tests, local demos, and embedding.
///
/// One linear record stream per batch. The read-latest-then-insert
/// sequence of an append executes entirely under the write lock, so
/// appends are linearized per ledger and a fork (two records sharing one
/// predecessor hash) cannot be stored. The `expected_prev` precondition of
/// [`LedgerWriter::try_append_after`] is still checked under the lock so a
/// caller holding a stale head gets [`LedgerError::Conflict`] instead of a
/// silently re-linked record.
pub struct InMemoryLedger<D: BatchDirectory> {
    directory: Arc<D>,
    inner: RwLock<LedgerState>,
}

#[derive(Default)]
struct LedgerState {
    streams: HashMap<BatchId, Vec<LedgerRecord>>,
    hash_index: HashMap<[u8; 32], (BatchId, usize)>,
}

impl<D: BatchDirectory> InMemoryLedger<D> {
    /// Construct an engine holding a handle to the batch directory. There
    /// is no ambient singleton: callers own the directory and pass it in.
    pub fn new(directory: Arc<D>) -> Self {
        Self {
            directory,
            inner: RwLock::new(LedgerState::default()),
        }
    }

    pub fn directory(&self) -> &Arc<D> {
        &self.directory
    }

    /// Choose the event timestamp for a new record.
    ///
    /// A supplied timestamp must be strictly after the stream head's, so
    /// ascending timestamp order always equals chain order. A defaulted
    /// "now" is nudged one millisecond past the head when the wall clock
    /// has not advanced (two appends within the same millisecond).
    fn choose_timestamp(
        supplied: Option<DateTime<Utc>>,
        head: Option<DateTime<Utc>>,
    ) -> Result<DateTime<Utc>, LedgerError> {
        match (supplied, head) {
            (Some(ts), Some(head_ts)) if ts <= head_ts => Err(LedgerError::Validation {
                field: "timestamp",
                reason: format!("{ts} is not after the stream head ({head_ts})"),
            }),
            (Some(ts), _) => Ok(ts),
            (None, Some(head_ts)) => {
                let now = Utc::now();
                if now > head_ts {
                    Ok(now)
                } else {
                    Ok(head_ts + Duration::milliseconds(1))
                }
            }
            (None, None) => Ok(Utc::now()),
        }
    }

    /// Transition the owning batch to `Delivered` after a delivery
    /// milestone. A batch that already progressed to `Sold` stays sold.
    fn mark_delivered(&self, batch: &BatchId) -> Result<(), LedgerError> {
        match self.directory.update_status(batch, BatchStatus::Delivered) {
            Ok(()) => Ok(()),
            Err(RegistryError::InvalidTransition { .. }) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl<D: BatchDirectory> InMemoryLedger<D> {
    /// Shared append path. `expected_prev` of `None` means "append to
    /// whatever the head is"; `Some(prev)` is a precondition checked under
    /// the write lock.
    fn append_inner(
        &self,
        draft: RecordDraft,
        expected_prev: Option<Option<[u8; 32]>>,
    ) -> Result<LedgerRecord, LedgerError> {
        self.directory
            .get(&draft.batch)?
            .ok_or(LedgerError::BatchNotFound(draft.batch))?;
        schema::validate(&draft)?;

        let record = {
            let mut state = self
                .inner
                .write()
                .map_err(|_| LedgerError::Storage("ledger write lock poisoned".into()))?;

            let stream = state.streams.entry(draft.batch).or_default();
            let prev_hash = stream.last().map(|r| r.record_hash);
            if let Some(expected) = expected_prev {
                if prev_hash != expected {
                    return Err(LedgerError::Conflict { batch: draft.batch });
                }
            }

            let head_timestamp = stream.last().map(|r| r.timestamp);
            let timestamp = Self::choose_timestamp(draft.timestamp, head_timestamp)?;

            let mut record = LedgerRecord {
                id: RecordId::new(),
                batch: draft.batch,
                author: draft.author,
                kind: draft.kind,
                location: draft.location,
                temperature: draft.temperature,
                humidity: draft.humidity,
                storage_conditions: draft.storage_conditions,
                transport_method: draft.transport_method,
                expected_delivery: draft.expected_delivery,
                actual_delivery: draft.actual_delivery,
                notes: draft.notes,
                payload: draft.payload,
                timestamp,
                prev_hash,
                record_hash: [0; 32],
            };
            record.record_hash =
                ContentHasher::RECORD.hash_linked(&record.payload_bytes()?, prev_hash);

            if state.hash_index.contains_key(&record.record_hash) {
                return Err(LedgerError::HashCollision);
            }

            let stream = state.streams.entry(draft.batch).or_default();
            stream.push(record.clone());
            let index = stream.len() - 1;
            state
                .hash_index
                .insert(record.record_hash, (draft.batch, index));
            record
        };

        tracing::debug!(
            batch = %record.batch.short_id(),
            kind = %record.kind,
            hash = %record.short_hash(),
            "record appended"
        );

        if record.is_delivery_milestone() {
            self.mark_delivered(&record.batch)?;
        }

        Ok(record)
    }
}

impl<D: BatchDirectory> LedgerWriter for InMemoryLedger<D> {
    fn append(&self, draft: RecordDraft) -> Result<LedgerRecord, LedgerError> {
        self.append_inner(draft, None)
    }

    fn try_append_after(
        &self,
        draft: RecordDraft,
        expected_prev: Option<[u8; 32]>,
    ) -> Result<LedgerRecord, LedgerError> {
        self.append_inner(draft, Some(expected_prev))
    }
}

impl<D: BatchDirectory> LedgerReader for InMemoryLedger<D> {
    fn read(&self, batch: &BatchId) -> Result<Vec<LedgerRecord>, LedgerError> {
        let state = self
            .inner
            .read()
            .map_err(|_| LedgerError::Storage("ledger read lock poisoned".into()))?;
        Ok(state.streams.get(batch).cloned().unwrap_or_default())
    }

    fn head(&self, batch: &BatchId) -> Result<Option<RecordRef>, LedgerError> {
        let state = self
            .inner
            .read()
            .map_err(|_| LedgerError::Storage("ledger read lock poisoned".into()))?;
        Ok(state
            .streams
            .get(batch)
            .and_then(|stream| stream.last())
            .map(RecordRef::from))
    }

    fn get_by_hash(&self, hash: [u8; 32]) -> Result<Option<LedgerRecord>, LedgerError> {
        let state = self
            .inner
            .read()
            .map_err(|_| LedgerError::Storage("ledger read lock poisoned".into()))?;
        let Some((batch, index)) = state.hash_index.get(&hash) else {
            return Ok(None);
        };
        Ok(state
            .streams
            .get(batch)
            .and_then(|stream| stream.get(*index))
            .cloned())
    }

    fn batches(&self) -> Result<Vec<BatchId>, LedgerError> {
        let state = self
            .inner
            .read()
            .map_err(|_| LedgerError::Storage("ledger read lock poisoned".into()))?;
        let mut ids: Vec<_> = state.streams.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    fn record_count(&self, batch: &BatchId) -> Result<u64, LedgerError> {
        let state = self
            .inner
            .read()
            .map_err(|_| LedgerError::Storage("ledger read lock poisoned".into()))?;
        Ok(state
            .streams
            .get(batch)
            .map(|s| s.len() as u64)
            .unwrap_or(0))
    }
}
