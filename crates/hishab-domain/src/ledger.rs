//! The ledger container: two insertion-ordered entry sequences plus the
//! shared id counter.

use serde::{Deserialize, Serialize};

use crate::entry::{Entry, EntryKind};

/// Combined income and expense record collections.
///
/// Sequence order is entry order, not timestamp order. `next_id` is shared
/// across both sequences and persisted with the data so ids never collide
/// across restarts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    pub income: Vec<Entry>,
    pub expense: Vec<Entry>,
    pub next_id: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            income: Vec::new(),
            expense: Vec::new(),
            next_id: 1,
        }
    }

    pub fn entries(&self, kind: EntryKind) -> &[Entry] {
        match kind {
            EntryKind::Income => &self.income,
            EntryKind::Expense => &self.expense,
        }
    }

    pub(crate) fn entries_mut(&mut self, kind: EntryKind) -> &mut Vec<Entry> {
        match kind {
            EntryKind::Income => &mut self.income,
            EntryKind::Expense => &mut self.expense,
        }
    }

    pub fn entry(&self, kind: EntryKind, id: u64) -> Option<&Entry> {
        self.entries(kind).iter().find(|entry| entry.id == id)
    }

    pub fn entry_mut(&mut self, kind: EntryKind, id: u64) -> Option<&mut Entry> {
        self.entries_mut(kind).iter_mut().find(|entry| entry.id == id)
    }

    /// Hands out the next id and advances the counter.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Appends an already-built entry to the given sequence.
    pub fn push(&mut self, kind: EntryKind, entry: Entry) {
        self.entries_mut(kind).push(entry);
    }

    /// Removes the first entry with the given id. Idempotent: removing a
    /// missing id returns `false` and leaves the ledger unchanged.
    pub fn remove(&mut self, kind: EntryKind, id: u64) -> bool {
        let entries = self.entries_mut(kind);
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        entries.len() != before
    }

    /// Empties both sequences and rewinds the id counter.
    pub fn reset(&mut self) {
        self.income.clear();
        self.expense.clear();
        self.next_id = 1;
    }

    /// Replaces the whole ledger with the restored one.
    pub fn restore(&mut self, replacement: Ledger) {
        *self = replacement;
    }

    /// Point-in-time copy used as aggregation and serialization input.
    /// Never exposes the internal containers mutably.
    pub fn snapshot(&self) -> Ledger {
        self.clone()
    }

    /// Total number of entries across both sequences.
    pub fn entry_count(&self) -> usize {
        self.income.len() + self.expense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expense.is_empty()
    }

    /// Iterates both sequences, income first, each entry tagged with its kind.
    pub fn iter_all(&self) -> impl Iterator<Item = (EntryKind, &Entry)> {
        self.income
            .iter()
            .map(|entry| (EntryKind::Income, entry))
            .chain(self.expense.iter().map(|entry| (EntryKind::Expense, entry)))
    }
}
