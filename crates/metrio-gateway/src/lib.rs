//! metrio gateway library entry.
//!
//! This crate is the HTTP face of the metrics engine: an axum router whose
//! middleware turns every completed request into registry calls, plus the
//! operational endpoints that expose the rendered text for scraping. It is
//! intended to be consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod instrument;
pub mod ops;
pub mod router;
