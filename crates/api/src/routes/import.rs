//! Route definitions for the `/admin/import` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{import, progress};
use crate::state::AppState;

/// Routes mounted at `/admin/import`.
///
/// ```text
/// POST   /{target}                -> upload           (admin)
/// GET    /progress                -> get_progress     (public)
/// DELETE /progress                -> clear_progress   (admin)
/// ```
///
/// Uploads larger than `max_upload_bytes` are rejected with 413.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/progress",
            get(progress::get_progress).delete(progress::clear_progress),
        )
        .route(
            "/{target}",
            post(import::upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}
