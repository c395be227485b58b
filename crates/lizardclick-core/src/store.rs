//! Storage contract the batched counter flushes through.
//!
//! Implementations live in `lizardclick-server::infra`.

use async_trait::async_trait;

use crate::error::Result;
use crate::record::CounterRecord;

/// Key-value persistence for counter records.
///
/// `increment` must be a single atomic upsert on the backing store. The
/// counter never reads a record back to compute a new value.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Look up a record by key.
    async fn find(&self, key: &str) -> Result<Option<CounterRecord>>;

    /// Insert a new record. Fails with `AlreadyExists` if `key` is present.
    async fn create(&self, key: &str, initial: u64) -> Result<CounterRecord>;

    /// Add `delta` to the record, creating it with `delta` when absent.
    async fn increment(&self, key: &str, delta: u64) -> Result<()>;

    /// Backend description for logs.
    fn describe(&self) -> String;
}
