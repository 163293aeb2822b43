//! Axum router wiring.
//!
//! Mounts the scrape endpoint at the configured path and layers the
//! instrumentation middleware over every route, the scrape endpoint
//! included.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, instrument, ops};

pub fn build_router(state: AppState) -> Router {
    let metrics_path = state.cfg().metrics.path.clone();

    Router::new()
        .route("/healthz", get(ops::healthz))
        .route(&metrics_path, get(ops::metrics))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            instrument::track_http,
        ))
        .with_state(state)
}
