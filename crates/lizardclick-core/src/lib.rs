//! lizardclick core: the batched click counter, its persisted record, the
//! storage contract it flushes through, and the shared error type.
//!
//! This crate carries no transport or runtime dependencies. Storage backends
//! and the HTTP surface live in `lizardclick-server`.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Every fallible
//! path surfaces as `ClickError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counter;
pub mod error;
pub mod record;
pub mod store;

/// Shared result type.
pub use error::{ClickError, Result};

pub use counter::{BatchedCounter, ClickOutcome, CounterState, FlushOutcome, FLUSH_THRESHOLD};
pub use record::{CounterRecord, GLOBAL_KEY};
pub use store::CounterStore;
