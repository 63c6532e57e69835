//! Authentication primitives.
//!
//! - [`jwt`] -- verification (and, for tooling and tests, issuance) of
//!   HS256 access tokens minted by the auth service.

pub mod jwt;
