//! Request extractors for authentication.
//!
//! - [`auth::AuthUser`] -- the caller's capabilities from a JWT Bearer token.

pub mod auth;
