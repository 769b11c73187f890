//! Server configuration

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "127.0.0.1:8080")
    pub bind_address: String,

    /// Allow any origin; hyperlocal deployments sit behind their own proxy
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            cors_permissive: true,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `CITYSWAP_ADDR` / `CITYSWAP_CORS_PERMISSIVE`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("CITYSWAP_ADDR") {
            config.bind_address = addr;
        }
        if let Ok(value) = std::env::var("CITYSWAP_CORS_PERMISSIVE") {
            match value.parse() {
                Ok(flag) => config.cors_permissive = flag,
                Err(_) => warn!(%value, "invalid CITYSWAP_CORS_PERMISSIVE, keeping default"),
            }
        }

        config
    }
}
