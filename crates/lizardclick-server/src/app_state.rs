//! Shared application state for the click service.
//!
//! One `BatchedCounter` per state instance, injected into handlers through
//! axum `State`. Tests build as many independent instances as they need.

use std::sync::Arc;

use lizardclick_core::error::Result;
use lizardclick_core::{BatchedCounter, ClickOutcome, CounterStore};

use crate::config::ClickConfig;
use crate::infra;
use crate::obs::ClickMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    counter: BatchedCounter,
    metrics: ClickMetrics,
}

impl AppState {
    /// Build state over an explicit store.
    pub fn new(cfg: &ClickConfig, store: Arc<dyn CounterStore>) -> Self {
        let counter = BatchedCounter::new(store, cfg.counter.key.clone(), cfg.counter.flush_threshold);
        Self {
            inner: Arc::new(AppStateInner {
                counter,
                metrics: ClickMetrics::default(),
            }),
        }
    }

    /// Build state with the store selected by `cfg.store`.
    pub fn from_config(cfg: &ClickConfig) -> Result<Self> {
        let store = infra::open_store(&cfg.store)?;
        Ok(Self::new(cfg, store))
    }

    /// Load the persisted total. Storage errors are logged and swallowed; the
    /// counter then keeps serving from zero.
    pub async fn initialize(&self) {
        let counter = self.counter();
        if let Err(e) = counter.initialize().await {
            tracing::error!(
                key = %counter.key(),
                store = %counter.store().describe(),
                error = %e,
                code = e.client_code().as_str(),
                "failed to initialize click count from store"
            );
        }
    }

    pub fn counter(&self) -> &BatchedCounter {
        &self.inner.counter
    }

    pub fn metrics(&self) -> &ClickMetrics {
        &self.inner.metrics
    }

    /// Count one click on a detached task and wait for its total.
    ///
    /// A client that disconnects mid-flush drops only the wait; the flush
    /// itself runs to completion and settles the counter state.
    pub async fn record_click(&self) -> u64 {
        let state = self.clone();
        match tokio::spawn(async move { state.count_click().await }).await {
            Ok(total) => total,
            Err(e) => {
                tracing::error!(error = %e, "click task failed");
                self.counter().total()
            }
        }
    }

    async fn count_click(&self) -> u64 {
        let ClickOutcome { total, flush } = self.counter().record_click().await;
        if let Some((outcome, elapsed)) = flush {
            let labels = [("result", outcome.as_str())];
            self.metrics().flush_attempts.inc(&labels);
            self.metrics().flush_duration.observe(&labels, elapsed);
        }
        total
    }

    pub fn set_draining(&self) {
        self.metrics().set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.metrics().is_draining()
    }

    /// Counter gauges appended to the `/metrics` output.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        let st = self.counter().snapshot();
        vec![
            ("lizardclick_persisted_total", st.persisted_total),
            ("lizardclick_pending_delta", st.pending_delta),
            ("lizardclick_flush_in_progress", u64::from(st.flush_in_progress)),
        ]
    }
}
