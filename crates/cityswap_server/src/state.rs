//! Application state

use std::sync::Arc;

use cityswap_core::{MemoryStore, SwapService};

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    /// The single ownership domain for all swap-intent reads and writes
    pub swaps: Arc<SwapService<MemoryStore>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            swaps: Arc::new(SwapService::new(MemoryStore::new())),
        }
    }
}
