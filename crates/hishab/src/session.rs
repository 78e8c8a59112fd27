//! Facade that coordinates ledger state, the in-progress guard,
//! persistence, and exports.

use chrono::NaiveDateTime;

use hishab_core::{
    BlobStore, Clock, CoreError, EntryService, OpGuard, SummaryService, Totals,
};
use hishab_domain::{Entry, EntryKind, Ledger};
use hishab_storage::{export_backup, export_csv, import_backup, SnapshotGateway};

/// A loaded ledger plus everything needed to operate on it.
///
/// Every mutation and export runs under the session guard: a second call
/// while one is in flight fails with [`CoreError::OperationInProgress`]
/// instead of interleaving. Mutations persist a snapshot after they apply;
/// a persistence fault is logged and surfaced through
/// [`last_persist_ok`](Self::last_persist_ok) without undoing the mutation.
pub struct LedgerSession<S: BlobStore> {
    ledger: Ledger,
    gateway: SnapshotGateway<S>,
    clock: Box<dyn Clock>,
    guard: OpGuard,
    last_persist_ok: bool,
}

impl<S: BlobStore> LedgerSession<S> {
    /// Opens a session against the given store, restoring the persisted
    /// snapshot when one exists and starting empty otherwise.
    pub fn open(store: S, clock: Box<dyn Clock>) -> Self {
        let gateway = SnapshotGateway::new(store);
        let ledger = gateway.load().unwrap_or_default();
        tracing::info!(entries = ledger.entry_count(), "ledger session opened");
        Self {
            ledger,
            gateway,
            clock,
            guard: OpGuard::new(),
            last_persist_ok: true,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Point-in-time copy of the ledger, safe to hand to aggregation or
    /// rendering code while the session keeps mutating.
    pub fn snapshot(&self) -> Ledger {
        self.ledger.snapshot()
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    /// Whether the most recent snapshot save succeeded. Mutations still
    /// apply in memory when persistence fails.
    pub fn last_persist_ok(&self) -> bool {
        self.last_persist_ok
    }

    /// Records a new entry and persists the updated snapshot.
    pub fn add_entry(
        &mut self,
        kind: EntryKind,
        description: &str,
        amount: f64,
        category: Option<&str>,
    ) -> Result<Entry, CoreError> {
        self.guarded(|session| {
            let entry = EntryService::add(
                &mut session.ledger,
                kind,
                description,
                amount,
                category,
                session.clock.as_ref(),
            )?;
            session.persist();
            Ok(entry)
        })
    }

    /// Rewrites the mutable fields of an existing entry and persists.
    pub fn edit_entry(
        &mut self,
        kind: EntryKind,
        id: u64,
        description: &str,
        amount: f64,
        category: Option<&str>,
    ) -> Result<Entry, CoreError> {
        self.guarded(|session| {
            let entry =
                EntryService::edit(&mut session.ledger, kind, id, description, amount, category)?;
            session.persist();
            Ok(entry)
        })
    }

    /// Deletes an entry, reporting whether one existed. Deleting a missing
    /// id is a no-op and skips the persistence round trip.
    pub fn delete_entry(&mut self, kind: EntryKind, id: u64) -> Result<bool, CoreError> {
        self.guarded(|session| {
            let removed = EntryService::remove(&mut session.ledger, kind, id);
            if removed {
                session.persist();
            }
            Ok(removed)
        })
    }

    /// Empties the ledger, rewinds the id counter, and persists.
    pub fn reset(&mut self) -> Result<(), CoreError> {
        self.guarded(|session| {
            EntryService::reset(&mut session.ledger);
            session.persist();
            Ok(())
        })
    }

    /// Replaces the ledger with a parsed backup and persists. A backup that
    /// fails to parse leaves the current ledger untouched.
    pub fn restore_backup(&mut self, text: &str) -> Result<(), CoreError> {
        self.guarded(|session| {
            let restored = import_backup(text)?;
            session.ledger.restore(restored);
            session.persist();
            Ok(())
        })
    }

    pub fn export_csv(&mut self) -> Result<String, CoreError> {
        self.guarded(|session| export_csv(&session.ledger))
    }

    pub fn export_backup(&mut self) -> Result<String, CoreError> {
        self.guarded(|session| {
            let now = session.clock.now();
            export_backup(&session.ledger, now)
        })
    }

    /// Persists the current snapshot outside any mutation, for embedders
    /// running a periodic autosave. Returns whether the save succeeded.
    pub fn save(&mut self) -> bool {
        self.persist();
        self.last_persist_ok
    }

    pub fn totals(&self) -> Totals {
        SummaryService::totals(&self.ledger)
    }

    /// Most recent entries across both sequences, newest first.
    pub fn recent(&self, limit: usize) -> Vec<(EntryKind, Entry)> {
        SummaryService::recent(&self.ledger, limit)
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    fn guarded<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        self.guard.begin()?;
        let result = op(self);
        self.guard.finish();
        result
    }

    fn persist(&mut self) {
        let now = self.clock.now();
        self.last_persist_ok = self.gateway.save(&self.ledger, now);
        if !self.last_persist_ok {
            tracing::warn!("ledger snapshot was not persisted; data remains in memory");
        }
    }
}
