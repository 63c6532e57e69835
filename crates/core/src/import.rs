//! Spreadsheet import targets, row normalization and import reporting.
//!
//! Each import target reads one named sheet. Rows are normalized into a
//! typed [`ImportRecord`]; rows that cannot be normalized are skipped with
//! a [`SkipReason`] rather than failing the whole import.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::identifiers::parse_entity_id;
use crate::spreadsheet::RowRecord;
use crate::types::EntityId;

pub const SHEET_ALIGNMENTS: &str = "Alignments";
pub const SHEET_REMEDIES: &str = "Remedies";
pub const SHEET_AILMENTS: &str = "Ailments";

pub const FIELD_ID: &str = "id";
pub const FIELD_AILMENT_ID: &str = "ailment_id";
pub const FIELD_REMEDY_ID: &str = "remedy_id";
pub const FIELD_NAME: &str = "name";
pub const FIELD_SLUG: &str = "slug";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_SCIENTIFIC_NAME: &str = "scientific_name";
pub const FIELD_COMMON_NAME: &str = "common_name";

/// Which entity table an uploaded document is imported into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportTarget {
    Alignments,
    Remedies,
    Ailments,
}

impl ImportTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alignments => "alignments",
            Self::Remedies => "remedies",
            Self::Ailments => "ailments",
        }
    }

    /// Name of the worksheet that must be present in the upload.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Self::Alignments => SHEET_ALIGNMENTS,
            Self::Remedies => SHEET_REMEDIES,
            Self::Ailments => SHEET_AILMENTS,
        }
    }
}

impl FromStr for ImportTarget {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alignments" => Ok(Self::Alignments),
            "remedies" => Ok(Self::Remedies),
            "ailments" => Ok(Self::Ailments),
            other => Err(CoreError::Validation(format!(
                "Unknown import target '{other}'"
            ))),
        }
    }
}

/// Lifecycle state of an import job as seen by a polling client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    #[default]
    Idle,
    Running,
    Complete,
    Failed,
}

impl ImportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Complete => "complete",
            Self::Failed => "failed",
        }
    }

    /// `true` once the job can no longer change state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

/// An ailment/remedy association to insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlignmentPair {
    pub ailment_id: EntityId,
    pub remedy_id: EntityId,
}

/// Field changes for an existing ailment. `None` leaves the column as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AilmentPatch {
    pub id: EntityId,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
}

/// Field changes for an existing remedy. `None` leaves the column as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemedyPatch {
    pub id: EntityId,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub scientific_name: Option<String>,
    pub common_name: Option<String>,
    pub description: Option<String>,
}

/// A validated row ready to be written to the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportRecord {
    Alignment(AlignmentPair),
    Ailment(AilmentPatch),
    Remedy(RemedyPatch),
}

/// Why a row was left out of an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "field", rename_all = "snake_case")]
pub enum SkipReason {
    /// A required column is absent or blank.
    MissingField(String),
    /// An identifier column does not hold a well-formed UUID.
    InvalidIdentifier(String),
    /// The identifier is well-formed but no such entity exists.
    NotFound,
    /// The row would give a unique column a value another entity already holds.
    Conflict(String),
}

/// A skipped row, numbered as in the spreadsheet (header is row 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: SkipReason,
}

/// Outcome of a completed import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub total_rows: usize,
    pub written: usize,
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    pub fn new(total_rows: usize) -> Self {
        Self {
            total_rows,
            ..Self::default()
        }
    }

    pub fn skip(&mut self, row: usize, reason: SkipReason) {
        self.skipped.push(SkippedRow { row, reason });
    }
}

/// Spreadsheet row number of the data row at `index` (0-based).
pub fn sheet_row_number(index: usize) -> usize {
    index + 2
}

/// Completion percentage after `processed` of `total` rows.
///
/// An empty import is complete.
pub fn percent_done(processed: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    processed as f64 / total as f64 * 100.0
}

/// Normalize a decoded row for the given target.
///
/// Unknown columns are ignored. Text fields are trimmed and blank text is
/// treated as "leave unchanged".
pub fn normalize_row(target: ImportTarget, row: &RowRecord) -> Result<ImportRecord, SkipReason> {
    match target {
        ImportTarget::Alignments => {
            let ailment_id = required_id(row, FIELD_AILMENT_ID)?;
            let remedy_id = required_id(row, FIELD_REMEDY_ID)?;
            Ok(ImportRecord::Alignment(AlignmentPair {
                ailment_id,
                remedy_id,
            }))
        }
        ImportTarget::Ailments => Ok(ImportRecord::Ailment(AilmentPatch {
            id: required_id(row, FIELD_ID)?,
            name: text(row, FIELD_NAME),
            slug: text(row, FIELD_SLUG),
            description: text(row, FIELD_DESCRIPTION),
        })),
        ImportTarget::Remedies => Ok(ImportRecord::Remedy(RemedyPatch {
            id: required_id(row, FIELD_ID)?,
            name: text(row, FIELD_NAME),
            slug: text(row, FIELD_SLUG),
            scientific_name: text(row, FIELD_SCIENTIFIC_NAME),
            common_name: text(row, FIELD_COMMON_NAME),
            description: text(row, FIELD_DESCRIPTION),
        })),
    }
}

fn required_id(row: &RowRecord, field: &str) -> Result<EntityId, SkipReason> {
    let cell = row
        .get(field)
        .filter(|cell| cell.as_text().is_some())
        .ok_or_else(|| SkipReason::MissingField(field.to_string()))?;
    parse_entity_id(cell).ok_or_else(|| SkipReason::InvalidIdentifier(field.to_string()))
}

fn text(row: &RowRecord, field: &str) -> Option<String> {
    row.get(field).and_then(|cell| cell.as_text())
}
