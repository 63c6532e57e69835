//! Spreadsheet import pipeline.
//!
//! Decoding happens up front so a missing or unreadable sheet is reported
//! to the uploader directly. The row loop then validates and writes one
//! row at a time, updating the [`ProgressStore`] after each row. Rows that
//! fail validation are skipped and listed in the [`ImportReport`]; a
//! backing-store failure aborts the import and marks it failed.

use std::sync::Arc;

use homeopathway_core::error::CoreError;
use homeopathway_core::import::{
    normalize_row, percent_done, sheet_row_number, ImportRecord, ImportReport, ImportStatus,
    ImportTarget, SkipReason,
};
use homeopathway_core::spreadsheet::{self, RowRecord};
use homeopathway_db::store::{CatalogStore, StoreError, WriteOutcome};
use tokio::task::JoinHandle;

use crate::progress::ProgressStore;

/// A decoded upload waiting to be written.
#[derive(Debug, Clone)]
pub struct DecodedImport {
    pub target: ImportTarget,
    pub rows: Vec<RowRecord>,
}

/// Decode `document` and extract the sheet required by `target`.
pub fn decode_upload(target: ImportTarget, document: &[u8]) -> Result<DecodedImport, CoreError> {
    let rows = spreadsheet::decode(document, target.sheet_name())?;
    Ok(DecodedImport { target, rows })
}

/// Validate and write every row of `job`, reporting progress under `import_id`.
///
/// On success the entry is left at 100% with status `complete`. On a store
/// failure the entry keeps its last percentage and is marked `failed`.
pub async fn run_import(
    store: &dyn CatalogStore,
    progress: &ProgressStore,
    import_id: &str,
    job: &DecodedImport,
) -> Result<ImportReport, StoreError> {
    let total = job.rows.len();
    let mut report = ImportReport::new(total);

    progress.start(import_id).await;
    tracing::info!(import_id, kind = job.target.as_str(), rows = total, "Import started");

    for (index, row) in job.rows.iter().enumerate() {
        let row_number = sheet_row_number(index);

        match normalize_row(job.target, row) {
            Ok(record) => match write_record(store, &record).await {
                Ok(WriteOutcome::Written) => report.written += 1,
                Ok(WriteOutcome::NotFound) => {
                    tracing::debug!(import_id, row = row_number, "Row references unknown entity");
                    report.skip(row_number, SkipReason::NotFound);
                }
                Ok(WriteOutcome::Conflict(field)) => {
                    tracing::debug!(
                        import_id,
                        row = row_number,
                        field,
                        "Row conflicts with existing entity",
                    );
                    report.skip(row_number, SkipReason::Conflict(field.to_string()));
                }
                Err(e) => {
                    progress.set_status(import_id, ImportStatus::Failed).await;
                    tracing::error!(
                        import_id,
                        row = row_number,
                        written = report.written,
                        error = %e,
                        "Import aborted on store failure",
                    );
                    return Err(e);
                }
            },
            Err(reason) => {
                tracing::debug!(import_id, row = row_number, ?reason, "Row skipped");
                report.skip(row_number, reason);
            }
        }

        progress
            .set_progress(import_id, percent_done(index + 1, total))
            .await;
    }

    progress.set_progress(import_id, percent_done(total, total)).await;
    progress.set_status(import_id, ImportStatus::Complete).await;
    tracing::info!(
        import_id,
        kind = job.target.as_str(),
        rows = total,
        written = report.written,
        skipped = report.skipped.len(),
        "Import complete",
    );

    Ok(report)
}

/// Run [`run_import`] on its own task.
///
/// The job runs to completion even if the returned handle is dropped or the
/// request that started it is cancelled, so its progress entry always ends
/// `complete` or `failed`. Failures are logged and recorded either way.
pub fn spawn_import(
    store: Arc<dyn CatalogStore>,
    progress: Arc<ProgressStore>,
    import_id: String,
    job: DecodedImport,
) -> JoinHandle<Result<ImportReport, StoreError>> {
    tokio::spawn(async move { run_import(store.as_ref(), &progress, &import_id, &job).await })
}

async fn write_record(
    store: &dyn CatalogStore,
    record: &ImportRecord,
) -> Result<WriteOutcome, StoreError> {
    match record {
        ImportRecord::Alignment(pair) => store.upsert_alignment(pair).await,
        ImportRecord::Ailment(patch) => store.update_ailment(patch).await,
        ImportRecord::Remedy(patch) => store.update_remedy(patch).await,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use homeopathway_core::spreadsheet::{CellValue, SheetData};
    use homeopathway_db::models::ailment::CreateAilment;
    use homeopathway_db::models::remedy::CreateRemedy;
    use homeopathway_db::store::MemoryCatalogStore;

    use super::*;

    fn alignment_row(ailment_id: &str, remedy_id: &str) -> RowRecord {
        RowRecord::from([
            ("ailment_id".to_string(), CellValue::from(ailment_id)),
            ("remedy_id".to_string(), CellValue::from(remedy_id)),
        ])
    }

    async fn seeded_store() -> (MemoryCatalogStore, String, String) {
        let store = MemoryCatalogStore::new();
        let ailment = store
            .insert_ailment(CreateAilment {
                name: "Insomnia".into(),
                slug: "insomnia".into(),
                description: None,
            })
            .await;
        let remedy = store
            .insert_remedy(CreateRemedy {
                name: "Coffea cruda".into(),
                slug: "coffea-cruda".into(),
                scientific_name: None,
                common_name: None,
                description: None,
            })
            .await;
        (store, ailment.id.to_string(), remedy.id.to_string())
    }

    #[test]
    fn decode_upload_requires_target_sheet() {
        let document = spreadsheet::encode(&[SheetData::new("Remedies", Vec::new())]).unwrap();
        assert_matches!(
            decode_upload(ImportTarget::Alignments, &document),
            Err(CoreError::MissingSheet(sheet)) if sheet == "Alignments"
        );
    }

    #[tokio::test]
    async fn valid_rows_are_written_and_bad_rows_reported() {
        let (store, ailment, remedy) = seeded_store().await;
        let progress = ProgressStore::new();
        let job = DecodedImport {
            target: ImportTarget::Alignments,
            rows: vec![
                alignment_row(&ailment, &remedy),
                alignment_row("not-a-uuid", &remedy),
                alignment_row(&ailment, "0a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d"),
            ],
        };

        let report = run_import(&store, &progress, "job-1", &job).await.unwrap();

        assert_eq!(report.total_rows, 3);
        assert_eq!(report.written, 1);
        assert_eq!(
            report.skipped,
            vec![
                homeopathway_core::import::SkippedRow {
                    row: 3,
                    reason: SkipReason::InvalidIdentifier("ailment_id".into()),
                },
                homeopathway_core::import::SkippedRow {
                    row: 4,
                    reason: SkipReason::NotFound,
                },
            ]
        );
        assert_eq!(store.count_alignments().await.unwrap(), 1);

        let entry = progress.snapshot("job-1").await;
        assert_eq!(entry.progress, 100);
        assert_eq!(entry.status, ImportStatus::Complete);
    }

    #[tokio::test]
    async fn empty_sheet_completes_immediately() {
        let (store, _, _) = seeded_store().await;
        let progress = ProgressStore::new();
        let job = DecodedImport {
            target: ImportTarget::Remedies,
            rows: Vec::new(),
        };

        let report = run_import(&store, &progress, "empty", &job).await.unwrap();

        assert_eq!(report, ImportReport::new(0));
        assert_eq!(progress.get_progress("empty").await, 100);
        assert_eq!(progress.snapshot("empty").await.status, ImportStatus::Complete);
    }

    #[tokio::test]
    async fn slug_conflict_is_skipped_not_fatal() {
        let (store, _, _) = seeded_store().await;
        let sepia = store
            .insert_remedy(CreateRemedy {
                name: "Sepia".into(),
                slug: "sepia".into(),
                scientific_name: None,
                common_name: None,
                description: None,
            })
            .await;
        let progress = ProgressStore::new();
        let job = DecodedImport {
            target: ImportTarget::Remedies,
            rows: vec![RowRecord::from([
                ("id".to_string(), CellValue::from(sepia.id.to_string())),
                ("slug".to_string(), CellValue::from("coffea-cruda")),
            ])],
        };

        let report = run_import(&store, &progress, "dup", &job).await.unwrap();

        assert_eq!(report.written, 0);
        assert_eq!(report.skipped[0].reason, SkipReason::Conflict("slug".into()));
        assert_eq!(progress.snapshot("dup").await.status, ImportStatus::Complete);
    }

    #[tokio::test]
    async fn store_failure_stalls_progress_and_marks_failed() {
        let (store, ailment, remedy) = seeded_store().await;
        let progress = ProgressStore::new();
        let job = DecodedImport {
            target: ImportTarget::Alignments,
            rows: vec![
                alignment_row(&ailment, &remedy),
                alignment_row(&ailment, &remedy),
                alignment_row(&ailment, &remedy),
                alignment_row(&ailment, &remedy),
            ],
        };
        store.fail_writes_after(2);

        let result = run_import(&store, &progress, "job-2", &job).await;

        assert_matches!(result, Err(StoreError::Unavailable(_)));
        let entry = progress.snapshot("job-2").await;
        assert_eq!(entry.progress, 50);
        assert_eq!(entry.status, ImportStatus::Failed);
    }

    #[tokio::test]
    async fn spawned_import_reports_through_progress_store() {
        let (store, ailment, remedy) = seeded_store().await;
        let store = Arc::new(store);
        let progress = Arc::new(ProgressStore::new());
        let job = DecodedImport {
            target: ImportTarget::Alignments,
            rows: vec![alignment_row(&ailment, &remedy)],
        };

        let report = spawn_import(store.clone(), progress.clone(), "bg".into(), job)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(report.written, 1);
        assert_eq!(progress.snapshot("bg").await.status, ImportStatus::Complete);
        assert_eq!(store.count_alignments().await.unwrap(), 1);
    }
}
