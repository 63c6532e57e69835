//! Handlers for import progress polling.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::middleware::rbac::RequireAdmin;
use crate::progress::ProgressEntry;
use crate::query::ImportIdParams;
use crate::state::AppState;

/// GET /api/v1/admin/import/progress?importId=
///
/// Returns `{ progress, status }` for the given import. Never fails: a
/// missing or unparseable id reads as an idle job at 0%.
pub async fn get_progress(
    State(state): State<AppState>,
    params: Result<Query<ImportIdParams>, QueryRejection>,
) -> Json<ProgressEntry> {
    let params = params.map(|Query(p)| p).unwrap_or_default();
    Json(state.progress.snapshot(params.import_id()).await)
}

/// DELETE /api/v1/admin/import/progress?importId=
///
/// Forget a finished (or abandoned) import. Clearing an unknown id is a no-op.
pub async fn clear_progress(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ImportIdParams>,
) -> StatusCode {
    let previous = state.progress.snapshot(params.import_id()).await;
    state.progress.clear_progress(params.import_id()).await;
    tracing::info!(
        user_id = %admin.user_id,
        import_id = params.import_id(),
        status = previous.status.as_str(),
        "Import progress cleared",
    );
    StatusCode::NO_CONTENT
}
