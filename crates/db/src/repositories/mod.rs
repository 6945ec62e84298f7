//! Repository seam and its implementations.
//!
//! Handlers hold `Arc<dyn Repository<E>>`, so the PostgreSQL repositories and
//! the in-memory store are interchangeable.

use async_trait::async_trait;
use nzwalks_core::entity::Entity;
use nzwalks_core::query::ListQuery;
use nzwalks_core::types::DbId;

use crate::error::DbError;

pub mod memory;
pub mod region_repo;
pub mod walk_repo;

pub use memory::MemoryStore;
pub use region_repo::RegionRepo;
pub use walk_repo::WalkRepo;

/// CRUD over one entity type.
///
/// `get_by_id`, `update`, and `delete` return `None` when no row has the id.
/// `delete` returns the row as it was just before removal.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn get_all(&self, query: &ListQuery) -> Result<Vec<E>, DbError>;

    async fn get_by_id(&self, id: DbId) -> Result<Option<E>, DbError>;

    async fn create(&self, input: &E::New) -> Result<E, DbError>;

    async fn update(&self, id: DbId, input: &E::New) -> Result<Option<E>, DbError>;

    async fn delete(&self, id: DbId) -> Result<Option<E>, DbError>;

    /// Confirm the backing store is reachable.
    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}

/// Escape `%`, `_` and `\` so the value matches literally inside `ILIKE`.
pub(crate) fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub(crate) fn direction(ascending: bool) -> &'static str {
    if ascending {
        "ASC"
    } else {
        "DESC"
    }
}
