//! Top-level facade crate for lizardclick.
//!
//! Re-exports the counter core and the server library so users can depend on
//! a single crate.

pub mod core {
    pub use lizardclick_core::*;
}

pub mod server {
    pub use lizardclick_server::*;
}
