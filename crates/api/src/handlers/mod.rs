//! Request handlers for the bulk data endpoints.
//!
//! Handlers extract and authorize the request, delegate to the engines in
//! [`crate::engine`], and map errors via [`crate::error::AppError`].

pub mod export;
pub mod import;
pub mod progress;
