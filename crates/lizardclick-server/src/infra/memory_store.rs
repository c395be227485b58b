use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use lizardclick_core::error::{ClickError, Result};
use lizardclick_core::{CounterRecord, CounterStore};

/// Process-local store. Entry locking keeps `increment` atomic per key.
#[derive(Default)]
pub struct InMemoryCounterStore {
    records: DashMap<String, u64>,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Current stored value, if any.
    pub fn get(&self, key: &str) -> Option<u64> {
        self.records.get(key).map(|r| *r.value())
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn find(&self, key: &str) -> Result<Option<CounterRecord>> {
        Ok(self.get(key).map(|count| CounterRecord::with_count(key, count)))
    }

    async fn create(&self, key: &str, initial: u64) -> Result<CounterRecord> {
        match self.records.entry(key.to_string()) {
            Entry::Occupied(_) => Err(ClickError::AlreadyExists(key.to_string())),
            Entry::Vacant(v) => {
                v.insert(initial);
                Ok(CounterRecord::with_count(key, initial))
            }
        }
    }

    async fn increment(&self, key: &str, delta: u64) -> Result<()> {
        *self.records.entry(key.to_string()).or_insert(0) += delta;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}
