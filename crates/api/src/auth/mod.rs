//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing, verification, and length check.
//! - [`jwt`] -- access-token signing/validation and refresh-token helpers.

pub mod jwt;
pub mod password;
