//! lizardclick server library entry.
//!
//! Wires config, store backends, the batched counter and the HTTP surface
//! into one service. Consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod api;
pub mod infra;
pub mod obs;
pub mod ops;
pub mod router;
