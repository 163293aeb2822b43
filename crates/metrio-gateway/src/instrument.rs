//! Per-request HTTP instrumentation.
//!
//! Every completed request becomes one counter increment and one duration
//! observation, labeled by method, normalized path, and status. The path
//! label goes through `normalize_path` so raw IDs and UUIDs cannot blow up
//! series cardinality. Instrumentation failures are logged and swallowed;
//! they never affect the request being served.

use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use metrio_core::{normalize_path, Registry, Result};

use crate::app_state::AppState;

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// Standard latency ladder, in seconds.
pub const DURATION_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Register the two request metrics. Idempotent.
pub fn register_http_metrics(registry: &Registry) -> Result<()> {
    registry.register_counter(HTTP_REQUESTS_TOTAL, "Total HTTP requests served.")?;
    registry.register_histogram(
        HTTP_REQUEST_DURATION_SECONDS,
        "HTTP request latency in seconds.",
        &DURATION_BUCKETS,
    )?;
    Ok(())
}

/// Axum middleware: record (method, normalized path, status, duration)
/// for every completed request.
pub async fn track_http(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().as_str().to_string();
    let path = normalize_path(req.uri().path());
    let start = Instant::now();

    let res = next.run(req).await;

    let status = res.status().as_u16().to_string();
    let labels = [
        ("method", method.as_str()),
        ("path", path.as_str()),
        ("status", status.as_str()),
    ];
    if let Err(e) = record(state.registry(), &labels, start.elapsed().as_secs_f64()) {
        tracing::warn!(error = %e, %method, %path, "request instrumentation failed");
    }
    res
}

fn record(registry: &Registry, labels: &[(&str, &str)], elapsed_seconds: f64) -> Result<()> {
    registry.inc(HTTP_REQUESTS_TOTAL, labels)?;
    registry.observe(HTTP_REQUEST_DURATION_SECONDS, labels, elapsed_seconds)?;
    Ok(())
}
