//! Domain model for a single ledger entry.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::timestamp;

/// Fallback bucket for entries recorded without a category.
pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Discriminates the two ledger sequences an entry can belong to.
pub enum EntryKind {
    Income,
    Expense,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A single income or expense record.
///
/// `id` and `timestamp` are assigned once at creation and never change;
/// edits may only touch `description`, `category`, and `amount`.
pub struct Entry {
    pub id: u64,
    pub timestamp: String,
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub amount: f64,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Entry {
    pub fn new(
        id: u64,
        timestamp: String,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id,
            timestamp,
            description: description.into(),
            category: category.into(),
            amount,
        }
    }

    /// Structured view of the entry timestamp, `None` when malformed.
    pub fn moment(&self) -> Option<NaiveDateTime> {
        timestamp::parse(&self.timestamp)
    }

    /// Calendar day of the entry, `None` when the date portion is malformed.
    pub fn day(&self) -> Option<NaiveDate> {
        timestamp::parse_date(&self.timestamp)
    }
}
