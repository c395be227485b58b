//! Batched click counter.
//!
//! Clicks accumulate in memory as `pending_delta` on top of the last
//! confirmed `persisted_total`. Whenever the delta lands on an exact multiple
//! of the flush threshold and no flush is outstanding, one increment-by-threshold
//! upsert is sent to the store.
//!
//! Notes:
//! - The trigger is "exact multiple", not "at least". A failed flush at `T`
//!   is only retried at `2T`, and that retry still adds `T` while clearing the
//!   whole delta observed at trigger time. Both the store and the in-memory
//!   total end up short by `T`. This is kept for compatibility with existing
//!   deployments.
//! - State is guarded by a plain mutex that is never held across the storage
//!   await. Clicks keep landing while a flush is in flight.
//! - Dropping a `record_click` future mid-flush leaves the store outcome
//!   unknown; the guard only releases the flag. Callers whose futures can be
//!   cancelled (HTTP handlers) must run clicks on a detached task.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::store::CounterStore;

/// Default batch size.
pub const FLUSH_THRESHOLD: u64 = 1000;

/// Point-in-time copy of the counter state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterState {
    /// Last value confirmed by the store.
    pub persisted_total: u64,
    /// Clicks seen since the last successful flush.
    pub pending_delta: u64,
    pub flush_in_progress: bool,
}

impl CounterState {
    /// Best known total.
    pub fn total(&self) -> u64 {
        self.persisted_total + self.pending_delta
    }
}

/// Result of a flush attempt made by a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    Persisted,
    Failed,
}

impl FlushOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            FlushOutcome::Persisted => "persisted",
            FlushOutcome::Failed => "failed",
        }
    }
}

/// What a single `record_click` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Best known total after this click.
    pub total: u64,
    /// Set when this click triggered a flush.
    pub flush: Option<(FlushOutcome, Duration)>,
}

pub struct BatchedCounter {
    store: Arc<dyn CounterStore>,
    key: String,
    threshold: u64,
    state: Mutex<CounterState>,
}

impl BatchedCounter {
    /// Create a counter over `store` for record `key`. A zero threshold is
    /// clamped to 1.
    pub fn new(store: Arc<dyn CounterStore>, key: impl Into<String>, threshold: u64) -> Self {
        Self {
            store,
            key: key.into(),
            threshold: threshold.max(1),
            state: Mutex::new(CounterState::default()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn store(&self) -> &Arc<dyn CounterStore> {
        &self.store
    }

    /// Load the persisted total, creating the record with 0 if it is absent.
    ///
    /// On error the state is left untouched; callers log and keep serving.
    pub async fn initialize(&self) -> Result<u64> {
        let record = match self.store.find(&self.key).await? {
            Some(record) => record,
            None => self.store.create(&self.key, 0).await?,
        };

        let mut st = self.lock();
        st.persisted_total = record.count;
        st.pending_delta = 0;
        tracing::info!(
            key = %self.key,
            persisted_total = st.persisted_total,
            pending_delta = st.pending_delta,
            "counter initialized"
        );
        Ok(record.count)
    }

    /// Best known total (persisted + pending).
    pub fn total(&self) -> u64 {
        self.lock().total()
    }

    pub fn snapshot(&self) -> CounterState {
        *self.lock()
    }

    /// Count one click, flushing a batch to the store when the pending delta
    /// hits a threshold multiple. Storage failures are logged, never returned.
    pub async fn record_click(&self) -> ClickOutcome {
        let observed = {
            let mut st = self.lock();
            st.pending_delta += 1;
            if st.pending_delta % self.threshold == 0 && !st.flush_in_progress {
                st.flush_in_progress = true;
                Some(st.pending_delta)
            } else {
                None
            }
        };

        let Some(observed) = observed else {
            return ClickOutcome {
                total: self.total(),
                flush: None,
            };
        };

        let mut guard = FlushGuard {
            counter: self,
            completed: false,
        };
        let started = Instant::now();
        let result = self.store.increment(&self.key, self.threshold).await;
        let elapsed = started.elapsed();

        let flush = {
            let mut st = self.lock();
            let outcome = match result {
                Ok(()) => {
                    st.persisted_total += self.threshold;
                    // Clicks that arrived during the await stay pending.
                    // Saturates when `initialize` ran while the flush was out.
                    st.pending_delta = st.pending_delta.saturating_sub(observed);
                    tracing::debug!(
                        key = %self.key,
                        persisted_total = st.persisted_total,
                        pending_delta = st.pending_delta,
                        elapsed_us = elapsed.as_micros() as u64,
                        "batch flushed"
                    );
                    FlushOutcome::Persisted
                }
                Err(e) => {
                    tracing::error!(
                        key = %self.key,
                        error = %e,
                        code = e.client_code().as_str(),
                        pending_delta = st.pending_delta,
                        "failed to persist batch"
                    );
                    FlushOutcome::Failed
                }
            };
            st.flush_in_progress = false;
            guard.completed = true;
            outcome
        };
        drop(guard);

        ClickOutcome {
            total: self.total(),
            flush: Some((flush, elapsed)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CounterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears `flush_in_progress` if a flush future is dropped mid-await.
struct FlushGuard<'a> {
    counter: &'a BatchedCounter,
    completed: bool,
}

impl Drop for FlushGuard<'_> {
    fn drop(&mut self) {
        if self.completed {
            return;
        }
        self.counter.lock().flush_in_progress = false;
        tracing::warn!(key = %self.counter.key, "flush abandoned before completion");
    }
}
