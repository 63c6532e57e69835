pub mod export;
pub mod health;
pub mod import;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/import/{target}                           upload workbook (POST, admin)
/// /admin/import/progress                           poll (GET, public), clear (DELETE, admin)
///
/// /admin/export/{target}                           download workbook (GET, admin)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/admin/import", import::router(config.max_upload_bytes))
        .nest("/admin/export", export::router())
}
