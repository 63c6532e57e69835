//! Domain logic for the HomeoPathway catalog data service.
//!
//! Everything in this crate is synchronous and free of I/O so it can be
//! unit-tested without a database or HTTP server.

pub mod error;
pub mod export;
pub mod identifiers;
pub mod import;
pub mod roles;
pub mod spreadsheet;
pub mod types;
