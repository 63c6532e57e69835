//! Bulk data transfer engines.
//!
//! - [`import`] -- decodes an uploaded workbook, normalizes its rows and
//!   writes them to the catalog store while reporting progress.
//! - [`export`] -- reads the catalog store and builds a downloadable
//!   workbook.

pub mod export;
pub mod import;
