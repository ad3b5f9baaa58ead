use farmchain_types::{ActorId, Batch, BatchDraft, BatchId, BatchStatus, ScanToken};

use crate::error::RegistryResult;

/// Directory of produce batches.
///
/// All implementations must satisfy these invariants:
/// - A batch's id and scan token are assigned at creation and never change.
/// - Scan tokens are globally unique across the directory.
/// - Batches are never deleted; history must remain queryable.
/// - Status moves forward only (`registered → in_transit → delivered →
///   sold`); a backward transition is rejected, a same-state update is a
///   no-op.
/// - All storage errors are propagated, never silently ignored.
pub trait BatchDirectory: Send + Sync {
    /// Create a batch from a draft, issuing its id and scan token.
    fn create(&self, draft: BatchDraft) -> RegistryResult<Batch>;

    /// Fetch a batch by id. Returns `Ok(None)` if it does not exist.
    fn get(&self, id: &BatchId) -> RegistryResult<Option<Batch>>;

    /// Resolve a public scan token to its batch.
    fn get_by_token(&self, token: &ScanToken) -> RegistryResult<Option<Batch>>;

    /// All batches registered by a farmer, newest first.
    fn list_by_farmer(&self, farmer: &ActorId) -> RegistryResult<Vec<Batch>>;

    /// Batches available to consumers (`registered` or `delivered`),
    /// newest first.
    fn available(&self) -> RegistryResult<Vec<Batch>>;

    /// Case-insensitive substring search over crop type and variety,
    /// newest first.
    fn search(&self, query: &str) -> RegistryResult<Vec<Batch>>;

    /// Transition a batch's status, enforcing forward-only order.
    fn update_status(&self, id: &BatchId, status: BatchStatus) -> RegistryResult<()>;
}
