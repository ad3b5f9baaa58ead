use std::sync::Arc;

use farmchain_ledger::InMemoryLedger;
use farmchain_registry::InMemoryRegistry;

/// Shared application state handed to every handler.
///
/// The registry and the ledger engine are constructed explicitly here and
/// injected through axum state; nothing in the system reaches for an
/// ambient singleton.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<InMemoryRegistry>,
    pub ledger: Arc<InMemoryLedger<InMemoryRegistry>>,
}

impl AppState {
    pub fn new() -> Self {
        let registry = Arc::new(InMemoryRegistry::new());
        let ledger = Arc::new(InMemoryLedger::new(Arc::clone(&registry)));
        Self { registry, ledger }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
