//! Remedy entity model and DTOs.

use homeopathway_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A remedy row from the `remedies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Remedy {
    pub id: EntityId,
    pub name: String,
    pub slug: String,
    pub scientific_name: Option<String>,
    pub common_name: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new remedy.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRemedy {
    pub name: String,
    pub slug: String,
    pub scientific_name: Option<String>,
    pub common_name: Option<String>,
    pub description: Option<String>,
}
