//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use thiserror::Error;

pub use schema::{GatewayConfig, MetricsSection, ServerSection};

/// Configuration failures, raised at load time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("invalid config: {0}")]
    Invalid(String),
}

pub fn load_from_file(path: &str) -> Result<GatewayConfig, ConfigError> {
    let s = fs::read_to_string(path)?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig, ConfigError> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)?;
    cfg.validate()?;
    Ok(cfg)
}
