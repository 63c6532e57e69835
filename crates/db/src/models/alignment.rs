//! Ailment/remedy association rows.

use homeopathway_core::types::EntityId;
use serde::Serialize;
use sqlx::FromRow;

/// An `ailment_remedies` row joined with both entity names.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct AlignmentDetail {
    pub ailment_id: EntityId,
    pub ailment_name: String,
    pub remedy_id: EntityId,
    pub remedy_name: String,
}
