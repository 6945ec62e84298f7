//! Traits shared by the stored domain entities.

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::types::DbId;

/// A named field a list request may filter or sort on.
pub trait QueryField: Copy + Debug + Send + Sync + 'static {
    /// Resolve a caller-supplied field name (case-insensitive).
    ///
    /// Returns `None` for names the entity does not expose; callers ignore
    /// those rather than failing the request.
    fn parse(name: &str) -> Option<Self>;

    /// Whether the field holds text a substring filter can apply to.
    fn is_filterable(self) -> bool;
}

/// A domain entity owned by a repository.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// Human-readable entity name used in not-found errors.
    const NAME: &'static str;

    /// Write shape for create and update. Carries no identifier.
    type New: Clone + Debug + Send + Sync + 'static;

    type Field: QueryField;

    /// Sort applied when the caller names no (known) sort field.
    const DEFAULT_SORT: Self::Field;

    fn id(&self) -> DbId;

    /// Text value of a filterable field, `None` for non-text fields.
    fn field_text(&self, field: Self::Field) -> Option<&str>;

    fn compare_field(&self, other: &Self, field: Self::Field) -> Ordering;
}
