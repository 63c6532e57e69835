use std::sync::Arc;

use homeopathway_db::store::CatalogStore;

use crate::config::ServerConfig;
use crate::progress::ProgressStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Backing store for catalog entities (Postgres or in-memory).
    pub store: Arc<dyn CatalogStore>,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Progress of in-flight and finished imports, keyed by import id.
    pub progress: Arc<ProgressStore>,
}
