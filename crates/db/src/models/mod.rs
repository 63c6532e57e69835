//! Row types for the catalog tables.

pub mod ailment;
pub mod alignment;
pub mod remedy;
