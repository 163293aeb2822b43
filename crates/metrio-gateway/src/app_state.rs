//! Shared application state for the metrio gateway.

use std::sync::Arc;

use metrio_core::{Registry, Result};

use crate::config::GatewayConfig;
use crate::instrument;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    registry: Arc<Registry>,
}

impl AppState {
    /// Build state with a fresh registry.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        Self::with_registry(cfg, Arc::new(Registry::new()))
    }

    /// Build state around an injected registry (shared instance or a
    /// per-test one). Registration of the HTTP metrics is idempotent, so
    /// sharing one registry across states is fine.
    pub fn with_registry(cfg: GatewayConfig, registry: Arc<Registry>) -> Result<Self> {
        instrument::register_http_metrics(&registry)?;
        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, registry }),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }
}
