//! hishab-domain
//!
//! Pure domain models for the ledger (entries, the income/expense kind,
//! the ledger container, and timestamp rendering/parsing).
//! No I/O, no storage. Only data types and helpers over them.

pub mod entry;
pub mod ledger;
pub mod timestamp;

pub use entry::*;
pub use ledger::*;
