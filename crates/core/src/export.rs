//! Export targets and their fixed column projections.
//!
//! Only the columns listed here ever leave the database through an export.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::import::{SHEET_AILMENTS, SHEET_ALIGNMENTS, SHEET_REMEDIES};

pub const AILMENT_COLUMNS: &[&str] = &["id", "name", "slug", "description"];

pub const REMEDY_COLUMNS: &[&str] = &[
    "id",
    "name",
    "slug",
    "scientific_name",
    "common_name",
    "description",
];

pub const ALIGNMENT_COLUMNS: &[&str] = &["ailment_id", "ailment_name", "remedy_id", "remedy_name"];

/// Prefix of every generated export filename.
const FILENAME_PREFIX: &str = "homeopathway";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportTarget {
    Ailments,
    Remedies,
    Alignments,
    /// Every entity type, one sheet each.
    All,
}

/// One sheet of an export: its name and header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportSheet {
    Ailments,
    Remedies,
    Alignments,
}

impl ExportSheet {
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Self::Ailments => SHEET_AILMENTS,
            Self::Remedies => SHEET_REMEDIES,
            Self::Alignments => SHEET_ALIGNMENTS,
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Ailments => AILMENT_COLUMNS,
            Self::Remedies => REMEDY_COLUMNS,
            Self::Alignments => ALIGNMENT_COLUMNS,
        }
    }
}

impl ExportTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ailments => "ailments",
            Self::Remedies => "remedies",
            Self::Alignments => "alignments",
            Self::All => "all",
        }
    }

    /// Sheets included in this export, in workbook order.
    pub fn sheets(&self) -> &'static [ExportSheet] {
        match self {
            Self::Ailments => &[ExportSheet::Ailments],
            Self::Remedies => &[ExportSheet::Remedies],
            Self::Alignments => &[ExportSheet::Alignments],
            Self::All => &[
                ExportSheet::Ailments,
                ExportSheet::Remedies,
                ExportSheet::Alignments,
            ],
        }
    }

    /// Suggested download filename, e.g. `homeopathway-remedies-20260315.xlsx`.
    pub fn filename(&self, date: NaiveDate) -> String {
        format!(
            "{FILENAME_PREFIX}-{}-{}.xlsx",
            self.as_str(),
            date.format("%Y%m%d")
        )
    }
}

impl FromStr for ExportTarget {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ailments" => Ok(Self::Ailments),
            "remedies" => Ok(Self::Remedies),
            "alignments" => Ok(Self::Alignments),
            "all" => Ok(Self::All),
            other => Err(CoreError::Validation(format!(
                "Unknown export target '{other}'"
            ))),
        }
    }
}
