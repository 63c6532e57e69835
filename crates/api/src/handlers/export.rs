//! Handler for spreadsheet downloads.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue};
use homeopathway_core::export::ExportTarget;

use crate::engine::export::build_export;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/admin/export/{target}
///
/// Stream the current catalog as an XLSX attachment.
pub async fn download(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(target): Path<String>,
) -> AppResult<(HeaderMap, Vec<u8>)> {
    let target: ExportTarget = target.parse()?;
    let today = chrono::Utc::now().date_naive();

    let document = build_export(state.store.as_ref(), target, today).await?;
    tracing::info!(
        user_id = %admin.user_id,
        export = target.as_str(),
        filename = %document.filename,
        "Export downloaded",
    );

    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(document.content_type));
    headers.insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::InternalError(format!("Invalid filename header: {e}")))?,
    );

    Ok((headers, document.bytes))
}
