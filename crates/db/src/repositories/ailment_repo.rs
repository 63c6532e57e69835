//! Repository for the `ailments` table.

use homeopathway_core::import::AilmentPatch;
use sqlx::PgPool;

use crate::models::ailment::{Ailment, CreateAilment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, description, created_at, updated_at";

/// Provides read, create and patch operations for ailments.
pub struct AilmentRepo;

impl AilmentRepo {
    /// Insert a new ailment, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAilment) -> Result<Ailment, sqlx::Error> {
        let query = format!(
            "INSERT INTO ailments (name, slug, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ailment>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// List every ailment, ordered by name ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Ailment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ailments ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, Ailment>(&query).fetch_all(pool).await
    }

    /// Apply a patch. Only non-`None` fields are written.
    ///
    /// Returns `None` if no row with the patch's `id` exists.
    pub async fn update(pool: &PgPool, patch: &AilmentPatch) -> Result<Option<Ailment>, sqlx::Error> {
        let query = format!(
            "UPDATE ailments SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ailment>(&query)
            .bind(patch.id)
            .bind(&patch.name)
            .bind(&patch.slug)
            .bind(&patch.description)
            .fetch_optional(pool)
            .await
    }
}
