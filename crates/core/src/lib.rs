//! NZ Walks core: domain model, wire DTOs, and the versioned mapper.
//!
//! Nothing in this crate performs I/O. Persistence and image storage are
//! reached through the traits the other crates implement.

pub mod api_version;
pub mod difficulty;
pub mod dto;
pub mod entity;
pub mod error;
pub mod image;
pub mod mapping;
pub mod query;
pub mod region;
pub mod roles;
pub mod types;
pub mod walk;
