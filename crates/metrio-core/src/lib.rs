//! metrio core: the metrics engine shared by the gateway and embedders.
//!
//! This crate owns the registry of named, labeled counters and histograms,
//! the canonical label identity, the path-shape normalizer used to bound
//! label cardinality, and the Prometheus text exposition renderer. It
//! intentionally carries no transport or runtime dependencies so it can be
//! embedded in any process that wants a scrape endpoint.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `MetricsError`/`Result` so a bad
//! instrumentation call never crashes the process it is measuring.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counter;
pub mod error;
pub mod histogram;
pub mod label;
pub mod path;
pub mod registry;
mod render;

/// Shared result type.
pub use error::{MetricsError, Result};
pub use label::LabelSet;
pub use path::normalize_path;
pub use registry::{MetricType, Registry};
