//! Well-known role name constants.
//!
//! The role is carried in the `role` claim of access tokens minted by the
//! auth service.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
