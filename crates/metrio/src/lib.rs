//! Top-level facade crate for metrio.
//!
//! Re-exports the metrics engine and the gateway so users can depend on a single crate.

pub mod core {
    pub use metrio_core::*;
}

pub mod gateway {
    pub use metrio_gateway::*;
}
