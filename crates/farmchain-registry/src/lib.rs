//! Batch directory for Farmchain.
//!
//! Owns the produce-batch entities: creation with scan-token issuance,
//! lookup by id or token, per-farmer and availability listings, text
//! search, and guarded forward-only lifecycle transitions. The ledger
//! engine receives a handle to a [`BatchDirectory`] and treats it as its
//! source of truth for batch existence and the derived status field.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{RegistryError, RegistryResult};
pub use memory::InMemoryRegistry;
pub use traits::BatchDirectory;
