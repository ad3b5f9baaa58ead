use farmchain_registry::RegistryError;
use farmchain_types::BatchId;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("batch not found: {0}")]
    BatchNotFound(BatchId),

    #[error("validation failed for {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("concurrent append conflict on batch {batch}: stream head moved")]
    Conflict { batch: BatchId },

    #[error("record hash collision detected")]
    HashCollision,

    #[error("integrity violation at index {index}: {reason}")]
    Integrity { index: usize, reason: String },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RegistryError> for LedgerError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::BatchNotFound(id) => Self::BatchNotFound(id),
            RegistryError::TokenNotFound => Self::Storage(err.to_string()),
            RegistryError::InvalidTransition { .. } => Self::Storage(err.to_string()),
            RegistryError::Storage(reason) => Self::Storage(reason),
        }
    }
}

impl From<farmchain_crypto::HasherError> for LedgerError {
    fn from(err: farmchain_crypto::HasherError) -> Self {
        match err {
            farmchain_crypto::HasherError::Serialization(reason) => Self::Serialization(reason),
        }
    }
}
