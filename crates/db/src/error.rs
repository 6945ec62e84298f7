use nzwalks_core::types::DbId;

/// Errors from a repository.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A write referenced a row that does not exist.
    ///
    /// `field` is the wire name of the offending reference (e.g. `regionId`).
    #[error("{entity} with id {id} does not exist")]
    MissingReference {
        field: &'static str,
        entity: &'static str,
        id: DbId,
    },
}
