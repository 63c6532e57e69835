//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod ailment_repo;
pub mod alignment_repo;
pub mod remedy_repo;

pub use ailment_repo::AilmentRepo;
pub use alignment_repo::AlignmentRepo;
pub use remedy_repo::RemedyRepo;
