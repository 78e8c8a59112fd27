//! hishab
//!
//! Facade over the ledger crates: a [`LedgerSession`] that coordinates
//! entry mutations, summaries, persistence, and exports behind a single
//! in-progress guard, plus user configuration and tracing setup.

pub mod config;
pub mod session;

pub use config::{Config, ConfigError, ConfigStore};
pub use session::LedgerSession;

pub use hishab_core::{
    Averages, CategoryShare, Clock, CoreError, DayActivity, EntryService, FixedClock,
    MonthTotals, SummaryService, SystemClock, Totals,
};
pub use hishab_domain::{Entry, EntryKind, Ledger};
pub use hishab_storage::{FileBlobStore, MemoryBlobStore, SnapshotGateway};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes the global tracing subscriber. Safe to call more than once.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::from_default_env().add_directive("hishab=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("hishab tracing initialized");
    });
}
