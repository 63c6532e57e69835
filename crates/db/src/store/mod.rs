//! Backing-store abstraction for the import and export engines.
//!
//! The engines only need a handful of catalog operations, so they talk to
//! a [`CatalogStore`] trait object instead of a pool. [`PgCatalogStore`]
//! delegates to the repositories; [`MemoryCatalogStore`] keeps everything
//! in process and is used when no database is configured and in tests.

mod memory;
mod postgres;

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;

use async_trait::async_trait;
use homeopathway_core::import::{AilmentPatch, AlignmentPair, RemedyPatch};

use crate::models::ailment::Ailment;
use crate::models::alignment::AlignmentDetail;
use crate::models::remedy::Remedy;

/// Failure of the backing store itself (not of an individual row).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Backing store unavailable: {0}")]
    Unavailable(String),
}

/// Result of a single-row write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The referenced entity does not exist; nothing was written.
    NotFound,
    /// The named unique column already holds the new value on another
    /// entity; nothing was written.
    Conflict(&'static str),
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Confirm the store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;

    /// All ailments ordered by name.
    async fn list_ailments(&self) -> Result<Vec<Ailment>, StoreError>;

    /// All remedies ordered by name.
    async fn list_remedies(&self) -> Result<Vec<Remedy>, StoreError>;

    /// All ailment/remedy pairs ordered by ailment name, then remedy name.
    async fn list_alignments(&self) -> Result<Vec<AlignmentDetail>, StoreError>;

    async fn count_alignments(&self) -> Result<i64, StoreError>;

    /// Insert the pair if both endpoints exist. Existing pairs are left as-is
    /// and still count as written.
    async fn upsert_alignment(&self, pair: &AlignmentPair) -> Result<WriteOutcome, StoreError>;

    /// Update an existing ailment. Never creates rows. A slug already used by
    /// another ailment yields [`WriteOutcome::Conflict`].
    async fn update_ailment(&self, patch: &AilmentPatch) -> Result<WriteOutcome, StoreError>;

    /// Update an existing remedy. Never creates rows. A slug already used by
    /// another remedy yields [`WriteOutcome::Conflict`].
    async fn update_remedy(&self, patch: &RemedyPatch) -> Result<WriteOutcome, StoreError>;
}
