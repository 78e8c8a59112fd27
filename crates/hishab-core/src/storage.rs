//! Abstraction over persistence backends holding serialized blobs.

use crate::error::CoreError;

/// Key-value blob store the ledger snapshot is persisted against.
///
/// Models the local-storage contract: string values under string keys,
/// last write wins, no transactions. Implementations live in
/// `hishab-storage`.
pub trait BlobStore: Send + Sync {
    /// Returns the value stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Deletes the value under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}
