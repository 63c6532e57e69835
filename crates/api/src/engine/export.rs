//! Spreadsheet export pipeline.
//!
//! Each export sheet has a fixed column projection from
//! [`homeopathway_core::export`]; entity fields outside it are never
//! written.

use chrono::NaiveDate;
use homeopathway_core::error::CoreError;
use homeopathway_core::export::{ExportSheet, ExportTarget};
use homeopathway_core::spreadsheet::{self, CellValue, RowRecord, SheetData};
use homeopathway_db::models::ailment::Ailment;
use homeopathway_db::models::alignment::AlignmentDetail;
use homeopathway_db::models::remedy::Remedy;
use homeopathway_db::store::{CatalogStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Encode(#[from] CoreError),
}

/// A finished export ready to be sent as a download.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Read every sheet of `target` from `store` and encode them into one workbook.
pub async fn build_export(
    store: &dyn CatalogStore,
    target: ExportTarget,
    date: NaiveDate,
) -> Result<ExportDocument, ExportError> {
    let mut sheets = Vec::with_capacity(target.sheets().len());
    for sheet in target.sheets() {
        let rows: Vec<RowRecord> = match sheet {
            ExportSheet::Ailments => store.list_ailments().await?.iter().map(ailment_row).collect(),
            ExportSheet::Remedies => store.list_remedies().await?.iter().map(remedy_row).collect(),
            ExportSheet::Alignments => store
                .list_alignments()
                .await?
                .iter()
                .map(alignment_row)
                .collect(),
        };
        sheets.push(SheetData::with_columns(sheet.sheet_name(), sheet.columns(), rows));
    }

    let bytes = spreadsheet::encode(&sheets)?;
    tracing::info!(
        export = target.as_str(),
        sheets = sheets.len(),
        rows = sheets.iter().map(|s| s.rows.len()).sum::<usize>(),
        bytes = bytes.len(),
        "Export built",
    );

    Ok(ExportDocument {
        filename: target.filename(date),
        content_type: spreadsheet::XLSX_CONTENT_TYPE,
        bytes,
    })
}

/// Build a row holding exactly `columns`, in order, from a field lookup.
fn project(columns: &[&str], field: impl Fn(&str) -> CellValue) -> RowRecord {
    columns
        .iter()
        .map(|column| (column.to_string(), field(column)))
        .collect()
}

fn ailment_row(ailment: &Ailment) -> RowRecord {
    project(ExportSheet::Ailments.columns(), |column| match column {
        "id" => ailment.id.to_string().into(),
        "name" => ailment.name.clone().into(),
        "slug" => ailment.slug.clone().into(),
        "description" => ailment.description.clone().into(),
        _ => CellValue::Null,
    })
}

fn remedy_row(remedy: &Remedy) -> RowRecord {
    project(ExportSheet::Remedies.columns(), |column| match column {
        "id" => remedy.id.to_string().into(),
        "name" => remedy.name.clone().into(),
        "slug" => remedy.slug.clone().into(),
        "scientific_name" => remedy.scientific_name.clone().into(),
        "common_name" => remedy.common_name.clone().into(),
        "description" => remedy.description.clone().into(),
        _ => CellValue::Null,
    })
}

fn alignment_row(alignment: &AlignmentDetail) -> RowRecord {
    project(ExportSheet::Alignments.columns(), |column| match column {
        "ailment_id" => alignment.ailment_id.to_string().into(),
        "ailment_name" => alignment.ailment_name.clone().into(),
        "remedy_id" => alignment.remedy_id.to_string().into(),
        "remedy_name" => alignment.remedy_name.clone().into(),
        _ => CellValue::Null,
    })
}

#[cfg(test)]
mod tests {
    use homeopathway_core::import::AlignmentPair;
    use homeopathway_db::models::ailment::CreateAilment;
    use homeopathway_db::models::remedy::CreateRemedy;
    use homeopathway_db::store::MemoryCatalogStore;

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    #[tokio::test]
    async fn empty_catalog_exports_header_only_sheets() {
        let store = MemoryCatalogStore::new();

        let document = build_export(&store, ExportTarget::All, date()).await.unwrap();

        assert_eq!(document.filename, "homeopathway-all-20260315.xlsx");
        let sheets = spreadsheet::decode_all(&document.bytes).unwrap();
        let names: Vec<&str> = sheets.keys().map(String::as_str).collect();
        assert_eq!(names, ["Ailments", "Remedies", "Alignments"]);
        assert!(sheets.values().all(Vec::is_empty));
    }

    #[tokio::test]
    async fn remedies_export_is_projected_and_name_ordered() {
        let store = MemoryCatalogStore::new();
        for name in ["Sulphur", "Arnica"] {
            store
                .insert_remedy(CreateRemedy {
                    name: name.into(),
                    slug: name.to_lowercase(),
                    scientific_name: None,
                    common_name: Some(format!("{name} common")),
                    description: None,
                })
                .await;
        }

        let document = build_export(&store, ExportTarget::Remedies, date())
            .await
            .unwrap();
        let rows = spreadsheet::decode(&document.bytes, "Remedies").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], CellValue::from("Arnica"));
        assert_eq!(rows[1]["name"], CellValue::from("Sulphur"));
        assert_eq!(rows[0]["common_name"], CellValue::from("Arnica common"));
        // Null columns are blank cells; timestamps are never exported.
        assert!(!rows[0].contains_key("description"));
        assert!(!rows[0].contains_key("created_at"));
    }

    #[tokio::test]
    async fn alignments_export_carries_ids_and_names() {
        let store = MemoryCatalogStore::new();
        let ailment = store
            .insert_ailment(CreateAilment {
                name: "Cough".into(),
                slug: "cough".into(),
                description: None,
            })
            .await;
        let remedy = store
            .insert_remedy(CreateRemedy {
                name: "Bryonia".into(),
                slug: "bryonia".into(),
                scientific_name: None,
                common_name: None,
                description: None,
            })
            .await;
        store
            .upsert_alignment(&AlignmentPair {
                ailment_id: ailment.id,
                remedy_id: remedy.id,
            })
            .await
            .unwrap();

        let document = build_export(&store, ExportTarget::Alignments, date())
            .await
            .unwrap();
        let rows = spreadsheet::decode(&document.bytes, "Alignments").unwrap();

        assert_eq!(rows.len(), 1);
        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, ["ailment_id", "ailment_name", "remedy_id", "remedy_name"]);
        assert_eq!(rows[0]["ailment_id"], CellValue::from(ailment.id.to_string()));
        assert_eq!(rows[0]["remedy_name"], CellValue::from("Bryonia"));
    }
}
