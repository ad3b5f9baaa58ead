use farmchain_types::{BatchId, BatchStatus};
use thiserror::Error;

/// Errors produced by batch directory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("batch not found: {0}")]
    BatchNotFound(BatchId),

    #[error("no batch registered for the given scan token")]
    TokenNotFound,

    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: BatchStatus, to: BatchStatus },

    #[error("storage error: {0}")]
    Storage(String),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
