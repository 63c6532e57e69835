use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use homeopathway_core::error::CoreError;
use homeopathway_db::store::StoreError;
use serde_json::json;

use crate::engine::export::ExportError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `homeopathway_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The import row loop aborted on a store failure.
    #[error("Import failed: {0}")]
    ImportFailed(#[source] StoreError),

    /// The export could not be read or encoded.
    #[error("Export failed: {0}")]
    ExportFailed(#[from] ExportError),

    /// The multipart upload could not be read (malformed or over the size limit).
    #[error("Upload error: {0}")]
    Upload(#[from] MultipartError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::MissingFile => (
                    StatusCode::BAD_REQUEST,
                    "MISSING_FILE",
                    "No file uploaded".to_string(),
                ),
                CoreError::MissingSheet(sheet) => (
                    StatusCode::BAD_REQUEST,
                    "MISSING_SHEET",
                    format!("Sheet '{sheet}' not found"),
                ),
                CoreError::Decode(msg) => {
                    tracing::warn!(error = %msg, "Uploaded document could not be read");
                    (
                        StatusCode::BAD_REQUEST,
                        "DECODE_ERROR",
                        "Uploaded file is not a readable spreadsheet".to_string(),
                    )
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Encode(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Pipeline failures ---
            AppError::ImportFailed(err) => {
                tracing::error!(error = %err, "Import failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IMPORT_FAILED",
                    "Import failed".to_string(),
                )
            }
            AppError::ExportFailed(err) => {
                tracing::error!(error = %err, "Export failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_FAILED",
                    "Export failed".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::Upload(err) => {
                let status = err.status();
                let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "PAYLOAD_TOO_LARGE"
                } else {
                    "BAD_REQUEST"
                };
                (status, code, err.body_text())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
