//! Histogram state for a single series.

use std::sync::{Arc, Mutex, PoisonError};

/// Point-in-time copy of one histogram series.
#[derive(Debug, Clone, Default)]
pub struct HistogramSnapshot {
    /// Cumulative count per explicit boundary (`bucket_counts[i]` counts all
    /// observations <= `boundaries[i]`).
    pub bucket_counts: Vec<u64>,
    /// Sum of all observed values.
    pub sum: f64,
    /// Total observations; also the implicit `+Inf` bucket.
    pub count: u64,
}

/// Bucketed observation state behind one mutex.
///
/// Buckets, sum, and count move together under a single lock acquisition,
/// so a reader can never see buckets updated with a stale sum or count.
/// The boundary list is shared read-only from the metric definition.
#[derive(Debug)]
pub struct Histogram {
    boundaries: Arc<[f64]>,
    state: Mutex<HistogramSnapshot>,
}

impl Histogram {
    pub fn new(boundaries: Arc<[f64]>) -> Self {
        let state = HistogramSnapshot {
            bucket_counts: vec![0; boundaries.len()],
            sum: 0.0,
            count: 0,
        };
        Self {
            boundaries,
            state: Mutex::new(state),
        }
    }

    /// Strictly ascending, finite; `+Inf` is implicit.
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Record one observation: every bucket with boundary >= value, the
    /// sum, and the count, as one locked update.
    pub fn record(&self, value: f64) {
        let mut s = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        for (slot, &b) in s.bucket_counts.iter_mut().zip(self.boundaries.iter()) {
            if value <= b {
                *slot += 1;
            }
        }
        s.sum += value;
        s.count += 1;
    }

    pub fn snapshot(&self) -> HistogramSnapshot {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
