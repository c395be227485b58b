//! Counter store backends.
//!
//! - `memory`: process-local `DashMap`, lost on exit.
//! - `file`: JSON document on disk, atomic temp + rename writes.

pub mod file_store;
pub mod memory_store;

use std::sync::Arc;

use lizardclick_core::error::Result;
use lizardclick_core::CounterStore;

use crate::config::{StoreKind, StoreSection};

pub use file_store::FileCounterStore;
pub use memory_store::InMemoryCounterStore;

/// Build the backend selected by `store.kind`.
pub fn open_store(cfg: &StoreSection) -> Result<Arc<dyn CounterStore>> {
    let store: Arc<dyn CounterStore> = match cfg.kind {
        StoreKind::Memory => Arc::new(InMemoryCounterStore::new()),
        StoreKind::File => Arc::new(FileCounterStore::open(&cfg.path)?),
    };
    tracing::info!(store = %store.describe(), "counter store opened");
    Ok(store)
}
