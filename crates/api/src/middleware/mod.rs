//! Authentication and authorization.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::authorize`] -- Checks the permission table and resolves client scoping.

pub mod auth;
pub mod rbac;
