use farmchain_types::BatchId;

use crate::error::LedgerError;
use crate::records::{LedgerRecord, RecordDraft, RecordRef};

/// Write boundary for ledger append operations.
pub trait LedgerWriter: Send + Sync {
    /// Append a record to its batch's stream.
    ///
    /// Looks up the current stream head, links the new record to it, and
    /// inserts atomically: on any failure no partial record is visible.
    /// Concurrent appends to one batch are linearized internally and never
    /// fork the chain.
    fn append(&self, draft: RecordDraft) -> Result<LedgerRecord, LedgerError>;

    /// Conditional append: insert only if the stream head's hash still
    /// equals `expected_prev` (`None` = stream must be empty). Fails with
    /// [`LedgerError::Conflict`] when the head moved, never forking the
    /// chain.
    fn try_append_after(
        &self,
        draft: RecordDraft,
        expected_prev: Option<[u8; 32]>,
    ) -> Result<LedgerRecord, LedgerError>;
}

/// Read boundary for ledger query/verification operations.
pub trait LedgerReader: Send + Sync {
    /// All records for a batch in ascending event-timestamp order (equal
    /// to chain order). Empty for a batch with no records; never an error.
    fn read(&self, batch: &BatchId) -> Result<Vec<LedgerRecord>, LedgerError>;

    /// The most recent record of a batch's stream, if any.
    fn head(&self, batch: &BatchId) -> Result<Option<RecordRef>, LedgerError>;

    /// Look up a record anywhere in the ledger by its content hash.
    fn get_by_hash(&self, hash: [u8; 32]) -> Result<Option<LedgerRecord>, LedgerError>;

    /// Batches that have at least one record, in stable order.
    fn batches(&self) -> Result<Vec<BatchId>, LedgerError>;

    /// Number of records in a batch's stream.
    fn record_count(&self, batch: &BatchId) -> Result<u64, LedgerError>;
}
