use chrono::NaiveDate;
use hishab_core::BlobStore;
use hishab_domain::{Entry, EntryKind, Ledger};
use hishab_storage::{FileBlobStore, SnapshotGateway, STORAGE_KEY};
use serde_json::Value;
use tempfile::tempdir;

fn now() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 10, 31)
        .unwrap()
        .and_hms_opt(13, 15, 0)
        .unwrap()
}

fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::new();
    ledger.push(
        EntryKind::Income,
        Entry::new(1, "30/08/2022 - 10:30 AM".into(), "Gateway payment", "Sales", 70000.0),
    );
    ledger.push(
        EntryKind::Expense,
        Entry::new(2, "28/09/2022 - 09:20 AM".into(), "Office rent", "Rent", 2200.0),
    );
    ledger.next_id = 3;
    ledger
}

#[test]
fn file_store_saves_and_reloads_the_snapshot() {
    let dir = tempdir().expect("tempdir");
    let store = FileBlobStore::new(dir.path().join("data")).expect("create store");
    let gateway = SnapshotGateway::new(store);

    let ledger = sample_ledger();
    assert!(gateway.save(&ledger, now()));

    let loaded = gateway.load().expect("snapshot present");
    assert_eq!(loaded, ledger);

    let path = gateway.store().key_path(STORAGE_KEY);
    assert!(path.exists());
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
}

#[test]
fn load_returns_none_for_a_missing_key() {
    let dir = tempdir().expect("tempdir");
    let store = FileBlobStore::new(dir.path().join("data")).expect("create store");
    let gateway = SnapshotGateway::new(store);
    assert!(gateway.load().is_none());
}

#[test]
fn load_defaults_missing_fields_instead_of_failing() {
    let dir = tempdir().expect("tempdir");
    let store = FileBlobStore::new(dir.path().join("data")).expect("create store");
    store
        .put(STORAGE_KEY, r#"{"expenseEntries": [], "nextId": 5}"#)
        .expect("seed blob");

    let gateway = SnapshotGateway::new(store);
    let loaded = gateway.load().expect("snapshot present");
    assert!(loaded.income.is_empty());
    assert!(loaded.expense.is_empty());
    assert_eq!(loaded.next_id, 5);
}

#[test]
fn load_tolerates_garbage_blobs() {
    let dir = tempdir().expect("tempdir");
    let store = FileBlobStore::new(dir.path().join("data")).expect("create store");
    store.put(STORAGE_KEY, "{{not json").expect("seed blob");

    let gateway = SnapshotGateway::new(store);
    assert!(gateway.load().is_none());
}

#[test]
fn saved_blob_carries_version_and_save_time() {
    let dir = tempdir().expect("tempdir");
    let store = FileBlobStore::new(dir.path().join("data")).expect("create store");
    let gateway = SnapshotGateway::new(store);
    assert!(gateway.save(&sample_ledger(), now()));

    let blob = gateway
        .store()
        .get(STORAGE_KEY)
        .expect("read")
        .expect("present");
    let value: Value = serde_json::from_str(&blob).expect("valid JSON");
    assert_eq!(value["formatVersion"], hishab_storage::FORMAT_VERSION);
    assert_eq!(value["lastSavedAt"], "2022-10-31T13:15:00");
    assert_eq!(value["nextId"], 3);
    assert_eq!(value["incomeEntries"].as_array().map(Vec::len), Some(1));
}

#[test]
fn save_overwrites_the_previous_snapshot() {
    let dir = tempdir().expect("tempdir");
    let store = FileBlobStore::new(dir.path().join("data")).expect("create store");
    let gateway = SnapshotGateway::new(store);

    assert!(gateway.save(&sample_ledger(), now()));
    let mut emptied = sample_ledger();
    emptied.reset();
    assert!(gateway.save(&emptied, now()));

    let loaded = gateway.load().expect("snapshot present");
    assert!(loaded.is_empty());
    assert_eq!(loaded.next_id, 1);
}
