use std::sync::Arc;

use crate::attendance::AttendanceService;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the service and config are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Scan ingestion and presence queries over the injected store.
    pub attendance: AttendanceService,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
