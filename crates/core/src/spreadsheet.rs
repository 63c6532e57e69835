//! XLSX workbook codec.
//!
//! Converts between named row sets and an Office Open XML spreadsheet
//! buffer. Writing goes through `rust_xlsxwriter`, reading through
//! `calamine`. The first row of every sheet holds the column headers.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use indexmap::IndexMap;
use rust_xlsxwriter::{Workbook, XlsxError};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// MIME type of an `.xlsx` document.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A scalar cell value as stored in a worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Render the value as text, trimming surrounding whitespace.
    ///
    /// Numbers without a fractional part are rendered without a decimal
    /// point. Returns `None` for null and for blank strings.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

/// One row of a sheet: column header to cell value, in column order.
pub type RowRecord = IndexMap<String, CellValue>;

/// A named dataset to be written as one worksheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub name: String,
    /// Explicit header row. When empty, headers are derived from the keys
    /// of `rows` in first-seen order.
    pub columns: Vec<String>,
    pub rows: Vec<RowRecord>,
}

impl SheetData {
    /// A sheet whose headers are derived from its rows.
    pub fn new(name: impl Into<String>, rows: Vec<RowRecord>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows,
        }
    }

    /// A sheet with a fixed header row, written even when `rows` is empty.
    pub fn with_columns(name: impl Into<String>, columns: &[&str], rows: Vec<RowRecord>) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    fn header(&self) -> Vec<String> {
        if !self.columns.is_empty() {
            return self.columns.clone();
        }
        let mut header: Vec<String> = Vec::new();
        for row in &self.rows {
            for key in row.keys() {
                if !header.contains(key) {
                    header.push(key.clone());
                }
            }
        }
        header
    }
}

/// Serialize the given sheets into a single XLSX workbook.
///
/// Sheets are written in slice order. A workbook always contains at least
/// one worksheet, so an empty slice yields a single blank sheet.
pub fn encode(sheets: &[SheetData]) -> Result<Vec<u8>, CoreError> {
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook
            .add_worksheet()
            .set_name(sheet.name.as_str())
            .map_err(encode_error)?;

        let header = sheet.header();
        for (col, name) in header.iter().enumerate() {
            worksheet
                .write_string(0, column_index(col)?, name.as_str())
                .map_err(encode_error)?;
        }

        for (index, record) in sheet.rows.iter().enumerate() {
            let row = row_index(index + 1)?;
            for (col, name) in header.iter().enumerate() {
                let col = column_index(col)?;
                match record.get(name) {
                    Some(CellValue::Text(s)) => {
                        worksheet.write_string(row, col, s.as_str()).map_err(encode_error)?;
                    }
                    Some(CellValue::Number(n)) => {
                        worksheet.write_number(row, col, *n).map_err(encode_error)?;
                    }
                    Some(CellValue::Bool(b)) => {
                        worksheet.write_boolean(row, col, *b).map_err(encode_error)?;
                    }
                    Some(CellValue::Null) | None => {}
                }
            }
        }
    }

    if sheets.is_empty() {
        workbook.add_worksheet();
    }

    workbook.save_to_buffer().map_err(encode_error)
}

/// Parse an XLSX buffer and return the rows of `sheet_name`.
///
/// The first row is taken as the header row. Each following row becomes a
/// record keyed by header; empty cells are omitted and rows with no values
/// at all are dropped. Cell types are kept as stored.
pub fn decode(buffer: &[u8], sheet_name: &str) -> Result<Vec<RowRecord>, CoreError> {
    let mut workbook = open_workbook(buffer)?;

    if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
        return Err(CoreError::MissingSheet(sheet_name.to_string()));
    }

    read_sheet(&mut workbook, sheet_name)
}

/// Parse an XLSX buffer and return every sheet's rows, in workbook order.
pub fn decode_all(buffer: &[u8]) -> Result<IndexMap<String, Vec<RowRecord>>, CoreError> {
    let mut workbook = open_workbook(buffer)?;
    let mut sheets = IndexMap::new();
    for name in workbook.sheet_names() {
        let rows = read_sheet(&mut workbook, &name)?;
        sheets.insert(name, rows);
    }
    Ok(sheets)
}

fn open_workbook(buffer: &[u8]) -> Result<Xlsx<Cursor<&[u8]>>, CoreError> {
    Xlsx::new(Cursor::new(buffer)).map_err(|e| CoreError::Decode(e.to_string()))
}

fn read_sheet(
    workbook: &mut Xlsx<Cursor<&[u8]>>,
    sheet_name: &str,
) -> Result<Vec<RowRecord>, CoreError> {
    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| CoreError::Decode(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };

    // Columns with a blank header cannot be addressed and are ignored.
    let header: Vec<Option<String>> = header_row
        .iter()
        .map(|cell| cell_value(cell).and_then(|v| v.as_text()))
        .collect();

    let mut records = Vec::new();
    for row in rows {
        let mut record = RowRecord::new();
        for (cell, key) in row.iter().zip(&header) {
            let Some(key) = key else { continue };
            if let Some(value) = cell_value(cell) {
                record.insert(key.clone(), value);
            }
        }
        if !record.is_empty() {
            records.push(record);
        }
    }
    Ok(records)
}

fn cell_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        // Dates come through as their serial number, no calendar coercion.
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
    }
}

fn row_index(index: usize) -> Result<u32, CoreError> {
    u32::try_from(index).map_err(|_| CoreError::Encode(format!("row {index} out of range")))
}

fn column_index(index: usize) -> Result<u16, CoreError> {
    u16::try_from(index).map_err(|_| CoreError::Encode(format!("column {index} out of range")))
}

fn encode_error(err: XlsxError) -> CoreError {
    CoreError::Encode(err.to_string())
}
