use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use homeopathway_core::import::{AilmentPatch, AlignmentPair, RemedyPatch, FIELD_SLUG};
use homeopathway_core::types::EntityId;
use tokio::sync::RwLock;

use super::{CatalogStore, StoreError, WriteOutcome};
use crate::models::ailment::{Ailment, CreateAilment};
use crate::models::alignment::AlignmentDetail;
use crate::models::remedy::{CreateRemedy, Remedy};

#[derive(Default)]
struct Catalog {
    ailments: Vec<Ailment>,
    remedies: Vec<Remedy>,
    alignments: Vec<AlignmentPair>,
}

/// Process-local [`CatalogStore`].
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared. Writes can be made to fail after a set number of calls with
/// [`MemoryCatalogStore::fail_writes_after`].
pub struct MemoryCatalogStore {
    catalog: RwLock<Catalog>,
    writes: AtomicUsize,
    write_limit: AtomicUsize,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self {
            catalog: RwLock::new(Catalog::default()),
            writes: AtomicUsize::new(0),
            write_limit: AtomicUsize::new(usize::MAX),
        }
    }

    /// Insert a new ailment with a fresh v4 id.
    pub async fn insert_ailment(&self, input: CreateAilment) -> Ailment {
        let now = Utc::now();
        let ailment = Ailment {
            id: EntityId::new_v4(),
            name: input.name,
            slug: input.slug,
            description: input.description,
            created_at: now,
            updated_at: now,
        };
        self.catalog.write().await.ailments.push(ailment.clone());
        ailment
    }

    /// Insert a new remedy with a fresh v4 id.
    pub async fn insert_remedy(&self, input: CreateRemedy) -> Remedy {
        let now = Utc::now();
        let remedy = Remedy {
            id: EntityId::new_v4(),
            name: input.name,
            slug: input.slug,
            scientific_name: input.scientific_name,
            common_name: input.common_name,
            description: input.description,
            created_at: now,
            updated_at: now,
        };
        self.catalog.write().await.remedies.push(remedy.clone());
        remedy
    }

    /// Make every write after the first `successful` ones fail with
    /// [`StoreError::Unavailable`].
    pub fn fail_writes_after(&self, successful: usize) {
        self.writes.store(0, Ordering::SeqCst);
        self.write_limit.store(successful, Ordering::SeqCst);
    }

    fn check_write(&self) -> Result<(), StoreError> {
        let attempt = self.writes.fetch_add(1, Ordering::SeqCst);
        if attempt >= self.write_limit.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write rejected".into()));
        }
        Ok(())
    }
}

impl Default for MemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_ailments(&self) -> Result<Vec<Ailment>, StoreError> {
        let mut ailments = self.catalog.read().await.ailments.clone();
        ailments.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(ailments)
    }

    async fn list_remedies(&self) -> Result<Vec<Remedy>, StoreError> {
        let mut remedies = self.catalog.read().await.remedies.clone();
        remedies.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(remedies)
    }

    async fn list_alignments(&self) -> Result<Vec<AlignmentDetail>, StoreError> {
        let catalog = self.catalog.read().await;
        let mut details: Vec<AlignmentDetail> = catalog
            .alignments
            .iter()
            .filter_map(|pair| {
                let ailment = catalog.ailments.iter().find(|a| a.id == pair.ailment_id)?;
                let remedy = catalog.remedies.iter().find(|r| r.id == pair.remedy_id)?;
                Some(AlignmentDetail {
                    ailment_id: ailment.id,
                    ailment_name: ailment.name.clone(),
                    remedy_id: remedy.id,
                    remedy_name: remedy.name.clone(),
                })
            })
            .collect();
        details.sort_by(|a, b| {
            a.ailment_name
                .cmp(&b.ailment_name)
                .then_with(|| a.remedy_name.cmp(&b.remedy_name))
        });
        Ok(details)
    }

    async fn count_alignments(&self) -> Result<i64, StoreError> {
        Ok(self.catalog.read().await.alignments.len() as i64)
    }

    async fn upsert_alignment(&self, pair: &AlignmentPair) -> Result<WriteOutcome, StoreError> {
        self.check_write()?;
        let mut catalog = self.catalog.write().await;
        let endpoints_exist = catalog.ailments.iter().any(|a| a.id == pair.ailment_id)
            && catalog.remedies.iter().any(|r| r.id == pair.remedy_id);
        if !endpoints_exist {
            return Ok(WriteOutcome::NotFound);
        }
        if !catalog.alignments.contains(pair) {
            catalog.alignments.push(*pair);
        }
        Ok(WriteOutcome::Written)
    }

    async fn update_ailment(&self, patch: &AilmentPatch) -> Result<WriteOutcome, StoreError> {
        self.check_write()?;
        let mut catalog = self.catalog.write().await;
        let Some(index) = catalog.ailments.iter().position(|a| a.id == patch.id) else {
            return Ok(WriteOutcome::NotFound);
        };
        if slug_taken(catalog.ailments.iter().map(|a| (a.id, &a.slug)), patch.id, &patch.slug) {
            return Ok(WriteOutcome::Conflict(FIELD_SLUG));
        }
        let ailment = &mut catalog.ailments[index];
        apply(&mut ailment.name, &patch.name);
        apply(&mut ailment.slug, &patch.slug);
        apply_optional(&mut ailment.description, &patch.description);
        ailment.updated_at = Utc::now();
        Ok(WriteOutcome::Written)
    }

    async fn update_remedy(&self, patch: &RemedyPatch) -> Result<WriteOutcome, StoreError> {
        self.check_write()?;
        let mut catalog = self.catalog.write().await;
        let Some(index) = catalog.remedies.iter().position(|r| r.id == patch.id) else {
            return Ok(WriteOutcome::NotFound);
        };
        if slug_taken(catalog.remedies.iter().map(|r| (r.id, &r.slug)), patch.id, &patch.slug) {
            return Ok(WriteOutcome::Conflict(FIELD_SLUG));
        }
        let remedy = &mut catalog.remedies[index];
        apply(&mut remedy.name, &patch.name);
        apply(&mut remedy.slug, &patch.slug);
        apply_optional(&mut remedy.scientific_name, &patch.scientific_name);
        apply_optional(&mut remedy.common_name, &patch.common_name);
        apply_optional(&mut remedy.description, &patch.description);
        remedy.updated_at = Utc::now();
        Ok(WriteOutcome::Written)
    }
}

/// `true` if `slug` is set and already held by an entity other than `id`,
/// mirroring the `UNIQUE (slug)` constraints of the schema.
fn slug_taken<'a>(
    mut existing: impl Iterator<Item = (EntityId, &'a String)>,
    id: EntityId,
    slug: &Option<String>,
) -> bool {
    let Some(slug) = slug else { return false };
    existing.any(|(other, taken)| other != id && taken == slug)
}

fn apply(field: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        field.clone_from(value);
    }
}

fn apply_optional(field: &mut Option<String>, value: &Option<String>) {
    if value.is_some() {
        field.clone_from(value);
    }
}
