#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No file was uploaded")]
    MissingFile,

    #[error("Sheet '{0}' not found in workbook")]
    MissingSheet(String),

    #[error("Failed to read spreadsheet: {0}")]
    Decode(String),

    #[error("Failed to write spreadsheet: {0}")]
    Encode(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}
