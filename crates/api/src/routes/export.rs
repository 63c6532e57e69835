//! Route definitions for the `/admin/export` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::export;
use crate::state::AppState;

/// Routes mounted at `/admin/export`. Admin only.
///
/// ```text
/// GET    /{target}                -> download
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{target}", get(export::download))
}
