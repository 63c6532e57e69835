//! In-memory progress tracking for spreadsheet imports.
//!
//! Entries are keyed by the caller-supplied import id and live until they
//! are cleared or the process exits. Any holder of an id may read or
//! overwrite its entry; concurrent writers to one id are last-write-wins.

use std::collections::HashMap;

use homeopathway_core::import::ImportStatus;
use serde::Serialize;
use tokio::sync::RwLock;

/// Current state of one import job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProgressEntry {
    /// Percent complete, always within `0..=100`.
    pub progress: u8,
    pub status: ImportStatus,
}

/// Shared map from import id to [`ProgressEntry`].
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct ProgressStore {
    entries: RwLock<HashMap<String, ProgressEntry>>,
}

impl ProgressStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Record `value` percent for `id`, clamped to `0..=100` and rounded.
    ///
    /// An entry created by this call is marked running. Empty ids are
    /// ignored.
    pub async fn set_progress(&self, id: &str, value: f64) {
        if id.is_empty() {
            return;
        }
        let progress = clamp_percent(value);
        self.entries
            .write()
            .await
            .entry(id.to_string())
            .and_modify(|entry| entry.progress = progress)
            .or_insert(ProgressEntry {
                progress,
                status: ImportStatus::Running,
            });
    }

    /// Stored percentage for `id`, or `0` if unknown.
    pub async fn get_progress(&self, id: &str) -> u8 {
        self.snapshot(id).await.progress
    }

    /// Record the lifecycle status for `id`. Empty ids are ignored.
    pub async fn set_status(&self, id: &str, status: ImportStatus) {
        if id.is_empty() {
            return;
        }
        self.entries
            .write()
            .await
            .entry(id.to_string())
            .or_default()
            .status = status;
    }

    /// Reset `id` to a freshly started job at 0%.
    pub async fn start(&self, id: &str) {
        if id.is_empty() {
            return;
        }
        self.entries.write().await.insert(
            id.to_string(),
            ProgressEntry {
                progress: 0,
                status: ImportStatus::Running,
            },
        );
    }

    /// Progress and status for `id`; unknown ids read as idle at 0%.
    pub async fn snapshot(&self, id: &str) -> ProgressEntry {
        if id.is_empty() {
            return ProgressEntry::default();
        }
        self.entries
            .read()
            .await
            .get(id)
            .copied()
            .unwrap_or_default()
    }

    /// Remove the entry for `id`, if any.
    pub async fn clear_progress(&self, id: &str) {
        self.entries.write().await.remove(id);
    }

    /// Number of tracked jobs.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for ProgressStore {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_percent(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn values_are_clamped_and_rounded() {
        let store = ProgressStore::new();

        store.set_progress("job", 150.0).await;
        assert_eq!(store.get_progress("job").await, 100);

        store.set_progress("job", -5.0).await;
        assert_eq!(store.get_progress("job").await, 0);

        store.set_progress("job", 33.5).await;
        assert_eq!(store.get_progress("job").await, 34);

        store.set_progress("job", 66.4).await;
        assert_eq!(store.get_progress("job").await, 66);

        store.set_progress("job", f64::NAN).await;
        assert_eq!(store.get_progress("job").await, 0);
    }

    #[tokio::test]
    async fn unknown_and_empty_ids_read_as_zero() {
        let store = ProgressStore::new();
        assert_eq!(store.get_progress("missing").await, 0);
        assert_eq!(store.get_progress("").await, 0);
        assert_eq!(store.snapshot("missing").await.status, ImportStatus::Idle);
    }

    #[tokio::test]
    async fn empty_id_is_never_stored() {
        let store = ProgressStore::new();
        store.set_progress("", 50.0).await;
        store.set_status("", ImportStatus::Failed).await;
        store.start("").await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn clear_removes_entry_and_tolerates_absence() {
        let store = ProgressStore::new();
        store.set_progress("job", 40.0).await;
        store.clear_progress("job").await;
        store.clear_progress("job").await;
        assert_eq!(store.get_progress("job").await, 0);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn status_is_kept_across_progress_writes() {
        let store = ProgressStore::new();
        store.start("job").await;
        store.set_progress("job", 80.0).await;
        store.set_status("job", ImportStatus::Failed).await;
        store.set_progress("job", 90.0).await;

        let entry = store.snapshot("job").await;
        assert_eq!(entry.progress, 90);
        assert_eq!(entry.status, ImportStatus::Failed);
    }

    #[tokio::test]
    async fn distinct_ids_do_not_interfere() {
        let store = ProgressStore::new();
        store.set_progress("a", 10.0).await;
        store.set_progress("b", 90.0).await;
        assert_eq!(store.get_progress("a").await, 10);
        assert_eq!(store.get_progress("b").await, 90);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writers_leave_one_of_their_values() {
        let store = Arc::new(ProgressStore::new());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.set_progress("shared", f64::from(i)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let value = store.get_progress("shared").await;
        assert!(value < 32, "final value {value} must come from one of the writers");
        assert_eq!(store.len().await, 1);
    }
}
