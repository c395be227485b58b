//! Persisted counter record.

use serde::{Deserialize, Serialize};

/// Key of the single process-wide counter.
pub const GLOBAL_KEY: &str = "global";

/// The durable total as stored by a `CounterStore`.
///
/// A record that does not exist yet is treated as `count = 0`; see
/// [`CounterRecord::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRecord {
    pub id: String,
    #[serde(default)]
    pub count: u64,
}

impl CounterRecord {
    /// Default-constructed record for `id` (count 0).
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_count(id, 0)
    }

    pub fn with_count(id: impl Into<String>, count: u64) -> Self {
        Self {
            id: id.into(),
            count,
        }
    }
}
