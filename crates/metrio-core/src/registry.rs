//! Metric registry: definitions plus per-series state.
//!
//! Definitions are fixed at registration; series state is created lazily on
//! first increment/observe. The maps are `DashMap`-backed so concurrent
//! first use of a label set creates exactly one state object, and unrelated
//! series never contend on a shared lock. There is no global lock anywhere:
//! counters are lock-free atomics and each histogram series has its own
//! mutex.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::counter::Counter;
use crate::error::{MetricsError, Result};
use crate::histogram::Histogram;
use crate::label::LabelSet;

/// The two supported metric types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
}

impl MetricType {
    /// String form used in `# TYPE` lines and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Counter => "counter",
            MetricType::Histogram => "histogram",
        }
    }
}

/// Per-type series storage under one metric name.
pub(crate) enum SeriesStore {
    Counter(DashMap<LabelSet, Counter>),
    Histogram {
        boundaries: Arc<[f64]>,
        series: DashMap<LabelSet, Histogram>,
    },
}

impl SeriesStore {
    pub(crate) fn metric_type(&self) -> MetricType {
        match self {
            SeriesStore::Counter(_) => MetricType::Counter,
            SeriesStore::Histogram { .. } => MetricType::Histogram,
        }
    }
}

/// One registered metric: its help text plus all live series.
pub(crate) struct Metric {
    pub(crate) help: String,
    pub(crate) store: SeriesStore,
}

/// Process-wide metric state, safe for concurrent use through `&self`.
///
/// Explicitly constructed and passed by shared ownership, never a hidden
/// singleton, so tests can run independent registries side by side.
#[derive(Default)]
pub struct Registry {
    pub(crate) metrics: DashMap<String, Metric>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a counter. Idempotent for an identical definition; a name
    /// already held by a histogram is a `DefinitionConflict`.
    pub fn register_counter(&self, name: &str, help: &str) -> Result<()> {
        validate_name(name)?;
        match self.metrics.entry(name.to_string()) {
            Entry::Occupied(e) => match &e.get().store {
                SeriesStore::Counter(_) => Ok(()),
                SeriesStore::Histogram { .. } => Err(MetricsError::DefinitionConflict(format!(
                    "{name} is already registered as a histogram"
                ))),
            },
            Entry::Vacant(v) => {
                v.insert(Metric {
                    help: help.to_string(),
                    store: SeriesStore::Counter(DashMap::new()),
                });
                Ok(())
            }
        }
    }

    /// Register a histogram with explicit bucket boundaries (`+Inf` is
    /// implicit and must not be passed). Idempotent for an identical
    /// definition; different boundaries or a counter under the same name
    /// is a `DefinitionConflict`.
    pub fn register_histogram(&self, name: &str, help: &str, boundaries: &[f64]) -> Result<()> {
        validate_name(name)?;
        validate_boundaries(boundaries)?;
        match self.metrics.entry(name.to_string()) {
            Entry::Occupied(e) => match &e.get().store {
                SeriesStore::Histogram {
                    boundaries: existing,
                    ..
                } if existing.as_ref() == boundaries => Ok(()),
                SeriesStore::Histogram { .. } => Err(MetricsError::DefinitionConflict(format!(
                    "{name} is already registered with different buckets"
                ))),
                SeriesStore::Counter(_) => Err(MetricsError::DefinitionConflict(format!(
                    "{name} is already registered as a counter"
                ))),
            },
            Entry::Vacant(v) => {
                v.insert(Metric {
                    help: help.to_string(),
                    store: SeriesStore::Histogram {
                        boundaries: Arc::from(boundaries),
                        series: DashMap::new(),
                    },
                });
                Ok(())
            }
        }
    }

    /// Increment by 1.
    pub fn inc(&self, name: &str, labels: &[(&str, &str)]) -> Result<()> {
        self.increment(name, labels, 1.0)
    }

    /// Add `delta` to the counter series for `labels`, creating the series
    /// zero-initialized on first use.
    pub fn increment(&self, name: &str, labels: &[(&str, &str)], delta: f64) -> Result<()> {
        if delta < 0.0 || delta.is_nan() {
            return Err(MetricsError::InvalidDelta(delta));
        }
        let metric = self
            .metrics
            .get(name)
            .ok_or_else(|| MetricsError::UnknownMetric(name.to_string()))?;
        match &metric.store {
            SeriesStore::Counter(series) => {
                series
                    .entry(LabelSet::from_pairs(labels))
                    .or_default()
                    .add(delta);
                Ok(())
            }
            SeriesStore::Histogram { .. } => Err(MetricsError::UnknownMetric(format!(
                "{name} is not a counter"
            ))),
        }
    }

    /// Record one observation on the histogram series for `labels`.
    pub fn observe(&self, name: &str, labels: &[(&str, &str)], value: f64) -> Result<()> {
        let metric = self
            .metrics
            .get(name)
            .ok_or_else(|| MetricsError::UnknownMetric(name.to_string()))?;
        match &metric.store {
            SeriesStore::Histogram { boundaries, series } => {
                series
                    .entry(LabelSet::from_pairs(labels))
                    .or_insert_with(|| Histogram::new(Arc::clone(boundaries)))
                    .record(value);
                Ok(())
            }
            SeriesStore::Counter(_) => Err(MetricsError::UnknownMetric(format!(
                "{name} is not a histogram"
            ))),
        }
    }

    /// Drop all series state across all metrics; definitions survive.
    pub fn reset(&self) {
        for metric in self.metrics.iter() {
            match &metric.store {
                SeriesStore::Counter(series) => series.clear(),
                SeriesStore::Histogram { series, .. } => series.clear(),
            }
        }
    }

    /// Type of a registered name, if any.
    pub fn metric_type(&self, name: &str) -> Option<MetricType> {
        self.metrics.get(name).map(|m| m.store.metric_type())
    }
}

fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let head_ok = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':');
    if head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':') {
        Ok(())
    } else {
        Err(MetricsError::InvalidName(name.to_string()))
    }
}

fn validate_boundaries(boundaries: &[f64]) -> Result<()> {
    if boundaries.is_empty() {
        return Err(MetricsError::InvalidBoundaries(
            "bucket list must not be empty".into(),
        ));
    }
    if boundaries.iter().any(|b| !b.is_finite()) {
        return Err(MetricsError::InvalidBoundaries(
            "buckets must be finite (+Inf is implicit)".into(),
        ));
    }
    if boundaries.windows(2).any(|w| w[0] >= w[1]) {
        return Err(MetricsError::InvalidBoundaries(
            "buckets must be strictly ascending".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use super::*;

    #[test]
    fn reregistration_is_idempotent() {
        let r = Registry::new();
        r.register_counter("x", "help").unwrap();
        r.register_counter("x", "help").unwrap();
        r.register_histogram("h", "help", &[1.0, 2.0]).unwrap();
        r.register_histogram("h", "help", &[1.0, 2.0]).unwrap();
    }

    #[test]
    fn type_change_is_a_conflict() {
        let r = Registry::new();
        r.register_counter("x", "help").unwrap();
        let err = r.register_histogram("x", "help", &[1.0]).unwrap_err();
        assert!(matches!(err, MetricsError::DefinitionConflict(_)));

        r.register_histogram("g", "help", &[1.0]).unwrap();
        let err = r.register_counter("g", "help").unwrap_err();
        assert!(matches!(err, MetricsError::DefinitionConflict(_)));
    }

    #[test]
    fn boundary_change_is_a_conflict() {
        let r = Registry::new();
        r.register_histogram("h", "help", &[1.0, 2.0]).unwrap();
        let err = r.register_histogram("h", "help", &[1.0, 3.0]).unwrap_err();
        assert!(matches!(err, MetricsError::DefinitionConflict(_)));
    }

    #[test]
    fn bad_boundaries_are_rejected() {
        let r = Registry::new();
        for bounds in [&[][..], &[2.0, 1.0][..], &[1.0, 1.0][..], &[1.0, f64::INFINITY][..]] {
            let err = r.register_histogram("h", "help", bounds).unwrap_err();
            assert!(matches!(err, MetricsError::InvalidBoundaries(_)), "{bounds:?}");
        }
    }

    #[test]
    fn bad_names_are_rejected() {
        let r = Registry::new();
        for name in ["", "1abc", "with-dash", "with space", "emoji🙂"] {
            let err = r.register_counter(name, "help").unwrap_err();
            assert!(matches!(err, MetricsError::InvalidName(_)), "{name:?}");
        }
        for name in ["ok_name", "_leading", ":colon:name", "a1"] {
            r.register_counter(name, "help").unwrap();
        }
    }

    #[test]
    fn unregistered_use_is_unknown_metric() {
        let r = Registry::new();
        let err = r.inc("nope", &[]).unwrap_err();
        assert!(matches!(err, MetricsError::UnknownMetric(_)));
        let err = r.observe("nope", &[], 1.0).unwrap_err();
        assert!(matches!(err, MetricsError::UnknownMetric(_)));
    }

    #[test]
    fn type_mismatch_use_is_unknown_metric() {
        let r = Registry::new();
        r.register_counter("c", "help").unwrap();
        r.register_histogram("h", "help", &[1.0]).unwrap();
        assert!(matches!(
            r.observe("c", &[], 1.0).unwrap_err(),
            MetricsError::UnknownMetric(_)
        ));
        assert!(matches!(
            r.inc("h", &[]).unwrap_err(),
            MetricsError::UnknownMetric(_)
        ));
    }

    #[test]
    fn negative_delta_is_rejected_before_state_changes() {
        let r = Registry::new();
        r.register_counter("c", "help").unwrap();
        r.increment("c", &[], 2.0).unwrap();
        let err = r.increment("c", &[], -1.0).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidDelta(_)));
        let err = r.increment("c", &[], f64::NAN).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidDelta(_)));
        // Prior state is untouched.
        assert!(r.render().contains("c 2"));
    }

    #[test]
    fn label_order_addresses_the_same_series() {
        let r = Registry::new();
        r.register_counter("c", "help").unwrap();
        r.inc("c", &[("a", "1"), ("b", "2")]).unwrap();
        r.inc("c", &[("b", "2"), ("a", "1")]).unwrap();
        assert!(r.render().contains("c{a=\"1\",b=\"2\"} 2"));
    }

    #[test]
    fn reset_clears_series_but_keeps_definitions() {
        let r = Registry::new();
        r.register_counter("c", "help").unwrap();
        r.inc("c", &[("k", "v")]).unwrap();
        r.reset();
        assert_eq!(r.metric_type("c"), Some(MetricType::Counter));
        // Series is gone, so the next increment starts from zero again.
        r.inc("c", &[("k", "v")]).unwrap();
        assert!(r.render().contains("c{k=\"v\"} 1"));
    }
}
