//! hishab-storage
//!
//! Persistence gateway for the ledger: blob-store backends, the snapshot
//! save/load contract, CSV export, and JSON backup export/import.

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

use hishab_core::{BlobStore, CoreError};
use hishab_domain::{Entry, Ledger};

pub mod backup;
pub mod export;

pub use backup::{export_backup, import_backup};
pub use export::{export_csv, CSV_HEADER};

/// Fixed key the serialized ledger snapshot lives under.
pub const STORAGE_KEY: &str = "hishab.ledger";

/// Version tag written into snapshots and backups.
pub const FORMAT_VERSION: &str = "2.0.0";

const BLOB_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";
const LAST_SAVED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState<'a> {
    income_entries: &'a [Entry],
    expense_entries: &'a [Entry],
    next_id: u64,
    last_saved_at: String,
    format_version: &'static str,
}

/// Saves and loads ledger snapshots against a [`BlobStore`].
pub struct SnapshotGateway<S: BlobStore> {
    store: S,
}

impl<S: BlobStore> SnapshotGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serializes the snapshot under [`STORAGE_KEY`]. Returns `false` on any
    /// serialization or storage fault instead of raising, so callers can
    /// warn without failing the operation that triggered the save.
    pub fn save(&self, ledger: &Ledger, now: NaiveDateTime) -> bool {
        let state = PersistedState {
            income_entries: &ledger.income,
            expense_entries: &ledger.expense,
            next_id: ledger.next_id,
            last_saved_at: now.format(LAST_SAVED_FORMAT).to_string(),
            format_version: FORMAT_VERSION,
        };
        let blob = match serde_json::to_string(&state) {
            Ok(blob) => blob,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize ledger snapshot");
                return false;
            }
        };
        match self.store.put(STORAGE_KEY, &blob) {
            Ok(()) => {
                tracing::debug!(entries = ledger.entry_count(), "ledger snapshot saved");
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to persist ledger snapshot");
                false
            }
        }
    }

    /// Loads the snapshot, tolerating an absent key (`None`) and falling
    /// back per field on shape mismatches rather than rejecting the load.
    pub fn load(&self) -> Option<Ledger> {
        let blob = match self.store.get(STORAGE_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read ledger snapshot");
                return None;
            }
        };
        let value: Value = match serde_json::from_str(&blob) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "stored ledger snapshot is not valid JSON");
                return None;
            }
        };
        Some(coerce_ledger(&value))
    }
}

/// Rebuilds a ledger from a loosely-shaped JSON object, defaulting each
/// malformed field instead of failing the whole read. Within a sequence,
/// coercion is per entry: one unreadable record is dropped without taking
/// its siblings with it. The id counter is clamped above the highest entry
/// id so restored ids never collide.
pub(crate) fn coerce_ledger(value: &Value) -> Ledger {
    let income = coerce_entries(value.get("incomeEntries"));
    let expense = coerce_entries(value.get("expenseEntries"));
    let stored_next_id = value
        .get("nextId")
        .and_then(Value::as_u64)
        .filter(|id| *id >= 1)
        .unwrap_or(1);
    let highest_id = income
        .iter()
        .chain(expense.iter())
        .map(|entry| entry.id)
        .max()
        .unwrap_or(0);
    Ledger {
        income,
        expense,
        next_id: stored_next_id.max(highest_id + 1),
    }
}

fn coerce_entries(value: Option<&Value>) -> Vec<Entry> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Filesystem-backed blob store: one file per key under a root directory,
/// written atomically by staging to a temporary file.
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root).map_err(storage_error)?;
        Ok(Self { root })
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), BLOB_EXTENSION))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(storage_error(err)),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.key_path(key);
        let tmp = tmp_path(&path);
        fs::write(&tmp, value).map_err(storage_error)?;
        fs::rename(&tmp, &path).map_err(storage_error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let path = self.key_path(key);
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_error(err)),
        }
    }
}

/// In-memory blob store for tests and embedders that manage durability
/// themselves.
#[derive(Default)]
pub struct MemoryBlobStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let values = self
            .values
            .lock()
            .map_err(|_| CoreError::Storage("blob store lock poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| CoreError::Storage("blob store lock poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| CoreError::Storage("blob store lock poisoned".into()))?;
        values.remove(key);
        Ok(())
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "blob".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn storage_error(err: std::io::Error) -> CoreError {
    CoreError::Storage(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let store = MemoryBlobStore::new();
        assert_eq!(store.get("missing").unwrap(), None);
        store.put("key", "value").unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));
        store.remove("key").unwrap();
        assert_eq!(store.get("key").unwrap(), None);
        store.remove("key").expect("removing a missing key is fine");
    }

    #[test]
    fn canonical_key_slugs_namespaced_keys() {
        assert_eq!(canonical_key("hishab.ledger"), "hishab_ledger");
        assert_eq!(canonical_key("  "), "blob");
    }

    #[test]
    fn coerce_ledger_defaults_malformed_fields() {
        let value: Value = serde_json::from_str(
            r#"{"incomeEntries": "not-an-array", "expenseEntries": [], "nextId": 0}"#,
        )
        .unwrap();
        let ledger = coerce_ledger(&value);
        assert!(ledger.income.is_empty());
        assert!(ledger.expense.is_empty());
        assert_eq!(ledger.next_id, 1);
    }

    #[test]
    fn coerce_ledger_drops_only_the_unreadable_entries() {
        let value: Value = serde_json::from_str(
            r#"{
                "incomeEntries": [
                    {"id": 1, "timestamp": "30/08/2022 - 10:30 AM", "description": "Payment", "amount": 100.0},
                    {"id": "broken"},
                    {"id": 2, "timestamp": "05/09/2022 - 02:15 PM", "description": "Refund", "amount": 50.0}
                ],
                "expenseEntries": [],
                "nextId": 3
            }"#,
        )
        .unwrap();
        let ledger = coerce_ledger(&value);
        let ids: Vec<u64> = ledger.income.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn coerce_ledger_keeps_the_counter_above_existing_ids() {
        let value: Value = serde_json::from_str(
            r#"{
                "incomeEntries": [
                    {"id": 9, "timestamp": "30/08/2022 - 10:30 AM", "description": "Payment", "amount": 100.0}
                ],
                "expenseEntries": [],
                "nextId": 2
            }"#,
        )
        .unwrap();
        let ledger = coerce_ledger(&value);
        assert_eq!(ledger.income.len(), 1);
        assert_eq!(ledger.next_id, 10);
    }
}
