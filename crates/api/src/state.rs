use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// The service is stateless between requests: every planning or analytics
/// call carries the snapshot it operates on, so only configuration is shared.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (limits read by handlers).
    pub config: Arc<ServerConfig>,
}
