//! Lightweight in-process metrics.
//!
//! Counters and histograms are atomics behind `DashMap` label sets, rendered
//! in Prometheus text format by the `/metrics` handler.

pub mod metrics;

pub use metrics::{ClickMetrics, CounterVec, HistogramVec};
