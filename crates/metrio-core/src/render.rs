//! Prometheus text exposition (format version 0.0.4).
//!
//! Output is deterministic for unchanged data: metric names sorted, series
//! within a name sorted by canonical label key, labels within a series
//! sorted by name. There is no global lock during rendering; each series
//! value is current as of its own read instant, which matches standard
//! scrape semantics.

use std::fmt::Write;

use crate::histogram::HistogramSnapshot;
use crate::label::LabelSet;
use crate::registry::{Registry, SeriesStore};

/// Escape a label value for exposition output.
fn escape_label_value(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Escape help text (quotes stay literal on HELP lines).
fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Render an f64 sample or boundary value.
///
/// `Display` gives the shortest string that round-trips the float, and
/// whole values render without a decimal point. Infinities use the
/// exposition spelling.
fn format_value(v: f64) -> String {
    if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{v}")
    }
}

/// `label="value",...` body without braces; empty for the empty set.
fn label_body(labels: &LabelSet) -> String {
    labels
        .pairs()
        .iter()
        .map(|(k, v)| format!("{k}=\"{}\"", escape_label_value(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Same body wrapped in braces, or nothing for the empty set.
fn label_block(labels: &LabelSet) -> String {
    if labels.is_empty() {
        String::new()
    } else {
        format!("{{{}}}", label_body(labels))
    }
}

fn write_header(out: &mut String, name: &str, help: &str, kind: &str) {
    if !help.is_empty() {
        let _ = writeln!(out, "# HELP {name} {}", escape_help(help));
    }
    let _ = writeln!(out, "# TYPE {name} {kind}");
}

fn write_histogram_series(
    out: &mut String,
    name: &str,
    labels: &LabelSet,
    boundaries: &[f64],
    snap: &HistogramSnapshot,
) {
    let body = label_body(labels);
    let le_prefix = if body.is_empty() {
        String::new()
    } else {
        format!("{body},")
    };
    for (&boundary, &count) in boundaries.iter().zip(snap.bucket_counts.iter()) {
        let _ = writeln!(
            out,
            "{name}_bucket{{{le_prefix}le=\"{}\"}} {count}",
            format_value(boundary)
        );
    }
    let _ = writeln!(out, "{name}_bucket{{{le_prefix}le=\"+Inf\"}} {}", snap.count);
    let _ = writeln!(
        out,
        "{name}_sum{} {}",
        label_block(labels),
        format_value(snap.sum)
    );
    let _ = writeln!(out, "{name}_count{} {}", label_block(labels), snap.count);
}

impl Registry {
    /// Render every live series in Prometheus text format.
    ///
    /// Metrics with zero live series (freshly registered, or after
    /// [`Registry::reset`]) emit nothing, so an empty registry renders an
    /// empty body.
    pub fn render(&self) -> String {
        let mut names: Vec<String> = self.metrics.iter().map(|m| m.key().clone()).collect();
        names.sort();

        let mut out = String::new();
        for name in &names {
            let Some(metric) = self.metrics.get(name) else {
                continue;
            };
            match &metric.store {
                SeriesStore::Counter(series) => {
                    if series.is_empty() {
                        continue;
                    }
                    let mut rows: Vec<(String, LabelSet, f64)> = series
                        .iter()
                        .map(|r| (r.key().canonical_key(), r.key().clone(), r.value().get()))
                        .collect();
                    rows.sort_by(|a, b| a.0.cmp(&b.0));

                    write_header(&mut out, name, &metric.help, "counter");
                    for (_, labels, value) in rows {
                        let _ = writeln!(
                            out,
                            "{name}{} {}",
                            label_block(&labels),
                            format_value(value)
                        );
                    }
                }
                SeriesStore::Histogram { boundaries, series } => {
                    if series.is_empty() {
                        continue;
                    }
                    let mut rows: Vec<(String, LabelSet, HistogramSnapshot)> = series
                        .iter()
                        .map(|r| (r.key().canonical_key(), r.key().clone(), r.value().snapshot()))
                        .collect();
                    rows.sort_by(|a, b| a.0.cmp(&b.0));

                    write_header(&mut out, name, &metric.help, "histogram");
                    for (_, labels, snap) in rows {
                        write_histogram_series(&mut out, name, &labels, boundaries, &snap);
                    }
                }
            }
        }
        out
    }
}
