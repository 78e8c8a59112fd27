//! hishab-core
//!
//! Business logic and services for the ledger. Depends on hishab-domain.
//! No terminal I/O, no direct storage interactions; persistence backends
//! implement the [`storage::BlobStore`] trait.

pub mod entry_service;
pub mod error;
pub mod format;
pub mod guard;
pub mod storage;
pub mod summary_service;
pub mod time;

pub use entry_service::EntryService;
pub use error::CoreError;
pub use guard::OpGuard;
pub use storage::BlobStore;
pub use summary_service::*;
pub use time::{Clock, FixedClock, SystemClock};
