use async_trait::async_trait;
use homeopathway_core::import::{AilmentPatch, AlignmentPair, RemedyPatch, FIELD_SLUG};

use super::{CatalogStore, StoreError, WriteOutcome};
use crate::models::ailment::Ailment;
use crate::models::alignment::AlignmentDetail;
use crate::models::remedy::Remedy;
use crate::repositories::{AilmentRepo, AlignmentRepo, RemedyRepo};
use crate::DbPool;

/// [`CatalogStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: DbPool,
}

impl PgCatalogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn list_ailments(&self) -> Result<Vec<Ailment>, StoreError> {
        Ok(AilmentRepo::list(&self.pool).await?)
    }

    async fn list_remedies(&self) -> Result<Vec<Remedy>, StoreError> {
        Ok(RemedyRepo::list(&self.pool).await?)
    }

    async fn list_alignments(&self) -> Result<Vec<AlignmentDetail>, StoreError> {
        Ok(AlignmentRepo::list_detailed(&self.pool).await?)
    }

    async fn count_alignments(&self) -> Result<i64, StoreError> {
        Ok(AlignmentRepo::count(&self.pool).await?)
    }

    async fn upsert_alignment(&self, pair: &AlignmentPair) -> Result<WriteOutcome, StoreError> {
        if !AlignmentRepo::endpoints_exist(&self.pool, pair).await? {
            return Ok(WriteOutcome::NotFound);
        }
        let inserted = AlignmentRepo::upsert(&self.pool, pair).await?;
        if !inserted {
            tracing::debug!(
                ailment_id = %pair.ailment_id,
                remedy_id = %pair.remedy_id,
                "Alignment already present",
            );
        }
        Ok(WriteOutcome::Written)
    }

    async fn update_ailment(&self, patch: &AilmentPatch) -> Result<WriteOutcome, StoreError> {
        update_outcome(AilmentRepo::update(&self.pool, patch).await)
    }

    async fn update_remedy(&self, patch: &RemedyPatch) -> Result<WriteOutcome, StoreError> {
        update_outcome(RemedyRepo::update(&self.pool, patch).await)
    }
}

/// Map a patch result to a [`WriteOutcome`].
///
/// `id` is never rewritten by a patch, so the only unique constraint an
/// update can trip is the slug.
fn update_outcome<T>(result: Result<Option<T>, sqlx::Error>) -> Result<WriteOutcome, StoreError> {
    match result {
        Ok(Some(_)) => Ok(WriteOutcome::Written),
        Ok(None) => Ok(WriteOutcome::NotFound),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            tracing::debug!(constraint = ?e.constraint(), "Patch rejected by unique constraint");
            Ok(WriteOutcome::Conflict(FIELD_SLUG))
        }
        Err(e) => Err(e.into()),
    }
}
