//! Repository for the `ailment_remedies` association table.

use homeopathway_core::import::AlignmentPair;
use sqlx::PgPool;

use crate::models::alignment::AlignmentDetail;

/// Provides listing and idempotent insertion of ailment/remedy pairs.
pub struct AlignmentRepo;

impl AlignmentRepo {
    /// `true` if both the ailment and the remedy referenced by `pair` exist.
    pub async fn endpoints_exist(pool: &PgPool, pair: &AlignmentPair) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM ailments WHERE id = $1)
                AND EXISTS (SELECT 1 FROM remedies WHERE id = $2)",
        )
        .bind(pair.ailment_id)
        .bind(pair.remedy_id)
        .fetch_one(pool)
        .await
    }

    /// Insert the pair, doing nothing if it already exists.
    ///
    /// Returns `true` if a new row was inserted.
    pub async fn upsert(pool: &PgPool, pair: &AlignmentPair) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO ailment_remedies (ailment_id, remedy_id)
             VALUES ($1, $2)
             ON CONFLICT (ailment_id, remedy_id) DO NOTHING",
        )
        .bind(pair.ailment_id)
        .bind(pair.remedy_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List every pair with entity names, ordered by ailment then remedy name.
    pub async fn list_detailed(pool: &PgPool) -> Result<Vec<AlignmentDetail>, sqlx::Error> {
        sqlx::query_as::<_, AlignmentDetail>(
            "SELECT ar.ailment_id, a.name AS ailment_name, ar.remedy_id, r.name AS remedy_name
             FROM ailment_remedies ar
             JOIN ailments a ON a.id = ar.ailment_id
             JOIN remedies r ON r.id = ar.remedy_id
             ORDER BY a.name ASC, r.name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Total number of association rows.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ailment_remedies")
            .fetch_one(pool)
            .await
    }
}
