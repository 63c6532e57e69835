//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?importId=` as sent by the polling client.
#[derive(Debug, Default, Deserialize)]
pub struct ImportIdParams {
    #[serde(rename = "importId", default)]
    pub import_id: Option<String>,
}

impl ImportIdParams {
    /// The import id, or an empty string when absent.
    pub fn import_id(&self) -> &str {
        self.import_id.as_deref().unwrap_or_default()
    }
}

/// Query parameters for the upload endpoint (`?importId=&wait=`).
#[derive(Debug, Default, Deserialize)]
pub struct ImportParams {
    #[serde(rename = "importId", default)]
    pub import_id: Option<String>,
    /// Run the row loop inside the request instead of in the background.
    #[serde(default)]
    pub wait: bool,
}
