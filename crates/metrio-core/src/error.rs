//! Shared error type across metrio crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Validation failures raised by registry calls.
///
/// All of these are programming errors on the caller's side, surfaced
/// synchronously at the offending call. None are retried internally, and a
/// failed call never disturbs state already recorded for other series.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Name re-registered with a different type or different buckets.
    #[error("definition conflict: {0}")]
    DefinitionConflict(String),
    /// Increment/observe against a name not registered with that type.
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
    /// Counter delta below zero (or NaN).
    #[error("invalid delta: {0}")]
    InvalidDelta(f64),
    /// Histogram bucket list empty, non-finite, or not strictly ascending.
    #[error("invalid buckets: {0}")]
    InvalidBoundaries(String),
    /// Metric name outside `[a-zA-Z_:][a-zA-Z0-9_:]*`.
    #[error("invalid metric name: {0:?}")]
    InvalidName(String),
}
