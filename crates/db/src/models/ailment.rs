//! Ailment entity model and DTOs.

use homeopathway_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An ailment row from the `ailments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ailment {
    pub id: EntityId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new ailment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAilment {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}
