//! Shared helpers for the HTTP layer.
//!
//! - [`cookies`]: session cookie header values
//! - [`password`]: bcrypt hashing and verification

pub mod cookies;
pub mod password;
