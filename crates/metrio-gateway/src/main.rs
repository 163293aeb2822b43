//! metrio gateway binary.
//!
//! - loads strict YAML config (`metrio.yaml`)
//! - builds the shared registry + router
//! - serves `/healthz` and the configured scrape endpoint

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use metrio_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("metrio.yaml").expect("config load failed");
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("metric registration failed");
    let app = router::build_router(state);

    tracing::info!(%listen, "metrio-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
