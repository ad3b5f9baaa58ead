use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use farmchain_types::{ActorId, Batch, BatchDraft, BatchId, BatchStatus, ScanToken};

use crate::error::{RegistryError, RegistryResult};
use crate::traits::BatchDirectory;

/// In-memory batch directory for tests, local demos, and embedding.
pub struct InMemoryRegistry {
    inner: RwLock<RegistryState>,
}

#[derive(Default)]
struct RegistryState {
    batches: HashMap<BatchId, Batch>,
    token_index: HashMap<ScanToken, BatchId>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RegistryState::default()),
        }
    }

    fn sorted_newest_first(mut batches: Vec<Batch>) -> Vec<Batch> {
        batches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        batches
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchDirectory for InMemoryRegistry {
    fn create(&self, draft: BatchDraft) -> RegistryResult<Batch> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| RegistryError::Storage("registry write lock poisoned".into()))?;

        // UUID v7 + random nonce make a collision practically impossible,
        // but uniqueness is an invariant, not a probability.
        let mut batch = draft.into_batch();
        while state.token_index.contains_key(&batch.scan_token) {
            batch.scan_token = ScanToken::issue(&batch.id);
        }

        state.token_index.insert(batch.scan_token.clone(), batch.id);
        state.batches.insert(batch.id, batch.clone());
        tracing::debug!(batch = %batch.id.short_id(), crop = %batch.crop_type, "batch registered");
        Ok(batch)
    }

    fn get(&self, id: &BatchId) -> RegistryResult<Option<Batch>> {
        let state = self
            .inner
            .read()
            .map_err(|_| RegistryError::Storage("registry read lock poisoned".into()))?;
        Ok(state.batches.get(id).cloned())
    }

    fn get_by_token(&self, token: &ScanToken) -> RegistryResult<Option<Batch>> {
        let state = self
            .inner
            .read()
            .map_err(|_| RegistryError::Storage("registry read lock poisoned".into()))?;
        Ok(state
            .token_index
            .get(token)
            .and_then(|id| state.batches.get(id))
            .cloned())
    }

    fn list_by_farmer(&self, farmer: &ActorId) -> RegistryResult<Vec<Batch>> {
        let state = self
            .inner
            .read()
            .map_err(|_| RegistryError::Storage("registry read lock poisoned".into()))?;
        let batches = state
            .batches
            .values()
            .filter(|b| &b.farmer == farmer)
            .cloned()
            .collect();
        Ok(Self::sorted_newest_first(batches))
    }

    fn available(&self) -> RegistryResult<Vec<Batch>> {
        let state = self
            .inner
            .read()
            .map_err(|_| RegistryError::Storage("registry read lock poisoned".into()))?;
        let batches = state
            .batches
            .values()
            .filter(|b| matches!(b.status, BatchStatus::Registered | BatchStatus::Delivered))
            .cloned()
            .collect();
        Ok(Self::sorted_newest_first(batches))
    }

    fn search(&self, query: &str) -> RegistryResult<Vec<Batch>> {
        let needle = query.to_lowercase();
        let state = self
            .inner
            .read()
            .map_err(|_| RegistryError::Storage("registry read lock poisoned".into()))?;
        let batches = state
            .batches
            .values()
            .filter(|b| {
                b.crop_type.to_lowercase().contains(&needle)
                    || b.variety
                        .as_deref()
                        .is_some_and(|v| v.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        Ok(Self::sorted_newest_first(batches))
    }

    fn update_status(&self, id: &BatchId, status: BatchStatus) -> RegistryResult<()> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| RegistryError::Storage("registry write lock poisoned".into()))?;
        let batch = state
            .batches
            .get_mut(id)
            .ok_or(RegistryError::BatchNotFound(*id))?;

        if batch.status == status {
            return Ok(());
        }
        if !batch.status.can_transition_to(status) {
            return Err(RegistryError::InvalidTransition {
                from: batch.status,
                to: status,
            });
        }

        tracing::debug!(batch = %id.short_id(), from = %batch.status, to = %status, "status transition");
        batch.status = status;
        batch.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn draft(farmer: &str, crop: &str, variety: Option<&str>) -> BatchDraft {
        BatchDraft {
            farmer: ActorId::new(farmer),
            crop_type: crop.into(),
            variety: variety.map(Into::into),
            quantity: 50.0,
            unit: "kg".into(),
            harvest_date: Utc::now(),
            price_per_unit: None,
            organic: false,
        }
    }

    #[test]
    fn create_and_get() {
        let registry = InMemoryRegistry::new();
        let batch = registry.create(draft("f1", "carrot", None)).unwrap();
        let fetched = registry.get(&batch.id).unwrap().unwrap();
        assert_eq!(fetched, batch);
        assert_eq!(fetched.status, BatchStatus::Registered);
    }

    #[test]
    fn get_unknown_batch_is_none() {
        let registry = InMemoryRegistry::new();
        assert!(registry.get(&BatchId::new()).unwrap().is_none());
    }

    #[test]
    fn token_resolves_to_batch() {
        let registry = InMemoryRegistry::new();
        let batch = registry.create(draft("f1", "kale", None)).unwrap();
        let fetched = registry.get_by_token(&batch.scan_token).unwrap().unwrap();
        assert_eq!(fetched.id, batch.id);
    }

    #[test]
    fn list_by_farmer_filters_and_orders() {
        let registry = InMemoryRegistry::new();
        let first = registry.create(draft("f1", "carrot", None)).unwrap();
        let second = registry.create(draft("f1", "kale", None)).unwrap();
        registry.create(draft("f2", "beet", None)).unwrap();

        let mine = registry.list_by_farmer(&ActorId::new("f1")).unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, second.id);
        assert_eq!(mine[1].id, first.id);
    }

    #[test]
    fn available_excludes_in_transit_and_sold() {
        let registry = InMemoryRegistry::new();
        let a = registry.create(draft("f1", "carrot", None)).unwrap();
        let b = registry.create(draft("f1", "kale", None)).unwrap();
        let c = registry.create(draft("f1", "beet", None)).unwrap();

        registry.update_status(&a.id, BatchStatus::InTransit).unwrap();
        registry.update_status(&b.id, BatchStatus::Delivered).unwrap();
        registry.update_status(&c.id, BatchStatus::Sold).unwrap();

        let available = registry.available().unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, b.id);
    }

    #[test]
    fn search_is_case_insensitive_over_crop_and_variety() {
        let registry = InMemoryRegistry::new();
        registry.create(draft("f1", "Tomato", Some("Roma"))).unwrap();
        registry.create(draft("f1", "kale", None)).unwrap();

        assert_eq!(registry.search("tomato").unwrap().len(), 1);
        assert_eq!(registry.search("ROMA").unwrap().len(), 1);
        assert_eq!(registry.search("mango").unwrap().len(), 0);
    }

    #[test]
    fn backward_transition_is_rejected() {
        let registry = InMemoryRegistry::new();
        let batch = registry.create(draft("f1", "carrot", None)).unwrap();
        registry
            .update_status(&batch.id, BatchStatus::Delivered)
            .unwrap();

        let err = registry
            .update_status(&batch.id, BatchStatus::InTransit)
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::InvalidTransition {
                from: BatchStatus::Delivered,
                to: BatchStatus::InTransit,
            }
        );
    }

    #[test]
    fn same_state_update_is_noop() {
        let registry = InMemoryRegistry::new();
        let batch = registry.create(draft("f1", "carrot", None)).unwrap();
        registry
            .update_status(&batch.id, BatchStatus::Registered)
            .unwrap();
        let fetched = registry.get(&batch.id).unwrap().unwrap();
        assert_eq!(fetched.updated_at, batch.updated_at);
    }

    #[test]
    fn update_status_on_unknown_batch_fails() {
        let registry = InMemoryRegistry::new();
        let id = BatchId::new();
        let err = registry.update_status(&id, BatchStatus::Sold).unwrap_err();
        assert_eq!(err, RegistryError::BatchNotFound(id));
    }
}
