//! Handler for spreadsheet uploads.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use homeopathway_core::error::CoreError;
use homeopathway_core::import::{ImportReport, ImportStatus, ImportTarget};
use serde::Serialize;

use crate::engine::import::{decode_upload, spawn_import};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ImportParams;
use crate::state::AppState;

/// Multipart field carrying the uploaded workbook.
const FILE_FIELD: &str = "file";

/// Body returned once an import has been accepted or finished.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub success: bool,
    pub import_id: String,
    pub status: ImportStatus,
    /// Present only when the import ran inside the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ImportReport>,
}

/// POST /api/v1/admin/import/{target}?importId=&wait=
///
/// Accept a workbook in the `file` multipart field. Decoding is done before
/// responding, so a missing file or sheet is a 400; a body that is not
/// `multipart/form-data` at all counts as a missing file. The row loop runs on
/// its own task: the response is 202 right away, or with `wait=true` the
/// request waits for the report (200).
pub async fn upload(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(target): Path<String>,
    Query(params): Query<ImportParams>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<ImportResponse>)> {
    let target: ImportTarget = target.parse()?;
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Upload is not a multipart form");
        CoreError::MissingFile
    })?;

    let mut document = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        document = Some(field.bytes().await?);
    }
    let document = document
        .filter(|bytes| !bytes.is_empty())
        .ok_or(CoreError::MissingFile)?;

    let import_id = params
        .import_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let job = decode_upload(target, &document)?;
    tracing::info!(
        user_id = %admin.user_id,
        import_id = %import_id,
        kind = target.as_str(),
        bytes = document.len(),
        rows = job.rows.len(),
        wait = params.wait,
        "Import accepted",
    );

    // Mark the job running before replying so the first poll never reads idle.
    state.progress.start(&import_id).await;
    let handle = spawn_import(
        state.store.clone(),
        state.progress.clone(),
        import_id.clone(),
        job,
    );

    if params.wait {
        // The job keeps running on its own task if this request times out or
        // the client goes away.
        let report = handle
            .await
            .map_err(|e| AppError::InternalError(format!("Import task aborted: {e}")))?
            .map_err(AppError::ImportFailed)?;
        return Ok((
            StatusCode::OK,
            Json(ImportResponse {
                success: true,
                import_id,
                status: ImportStatus::Complete,
                report: Some(report),
            }),
        ));
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(ImportResponse {
            success: true,
            import_id,
            status: ImportStatus::Running,
            report: None,
        }),
    ))
}
