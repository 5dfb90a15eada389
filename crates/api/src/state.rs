use std::sync::Arc;

use prsk_core::lifecycle::Lifecycle;
use prsk_db::Backend;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Lifecycle engine over the configured store.
    pub lifecycle: Lifecycle<Backend>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(backend: Backend, config: ServerConfig) -> Self {
        Self {
            lifecycle: Lifecycle::new(backend),
            config: Arc::new(config),
        }
    }
}
