//! Repository for the `remedies` table.

use homeopathway_core::import::RemedyPatch;
use sqlx::PgPool;

use crate::models::remedy::{CreateRemedy, Remedy};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, slug, scientific_name, common_name, description, created_at, updated_at";

/// Provides read, create and patch operations for remedies.
pub struct RemedyRepo;

impl RemedyRepo {
    /// Insert a new remedy, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRemedy) -> Result<Remedy, sqlx::Error> {
        let query = format!(
            "INSERT INTO remedies (name, slug, scientific_name, common_name, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Remedy>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.scientific_name)
            .bind(&input.common_name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// List every remedy, ordered by name ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Remedy>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM remedies ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, Remedy>(&query).fetch_all(pool).await
    }

    /// Apply a patch. Only non-`None` fields are written.
    ///
    /// Returns `None` if no row with the patch's `id` exists.
    pub async fn update(pool: &PgPool, patch: &RemedyPatch) -> Result<Option<Remedy>, sqlx::Error> {
        let query = format!(
            "UPDATE remedies SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                scientific_name = COALESCE($4, scientific_name),
                common_name = COALESCE($5, common_name),
                description = COALESCE($6, description),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Remedy>(&query)
            .bind(patch.id)
            .bind(&patch.name)
            .bind(&patch.slug)
            .bind(&patch.scientific_name)
            .bind(&patch.common_name)
            .bind(&patch.description)
            .fetch_optional(pool)
            .await
    }
}
