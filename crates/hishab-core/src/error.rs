use thiserror::Error;

/// Unified error type for ledger operations and persistence.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Entry not found: {0}")]
    EntryNotFound(u64),
    #[error("Invalid backup format: {0}")]
    Format(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Another operation is in progress")]
    OperationInProgress,
}
