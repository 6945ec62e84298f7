//! List query model: filter, sort, and pagination.
//!
//! The handler only builds and validates a [`ListQuery`]; interpreting it is
//! the repository's job. [`ListQuery::apply`] is the reference semantics that
//! the in-memory store uses and the SQL repositories mirror.

use crate::entity::{Entity, QueryField};
use crate::error::{CoreError, FieldErrors};

pub const DEFAULT_PAGE_NUMBER: i64 = 1;

/// Default page size. Callers must not rely on unbounded results.
pub const DEFAULT_PAGE_SIZE: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filter_on: Option<String>,
    pub filter_query: Option<String>,
    pub sort_by: Option<String>,
    pub ascending: bool,
    pub page_number: i64,
    pub page_size: i64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filter_on: None,
            filter_query: None,
            sort_by: None,
            ascending: true,
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    /// Build a query from raw request parameters, applying defaults.
    ///
    /// Both `pageNumber` and `pageSize` must be at least 1; violations of
    /// either are reported together.
    pub fn new(
        filter_on: Option<String>,
        filter_query: Option<String>,
        sort_by: Option<String>,
        is_ascending: Option<bool>,
        page_number: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Self, CoreError> {
        let page_number = page_number.unwrap_or(DEFAULT_PAGE_NUMBER);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        let mut errors = FieldErrors::new();
        if page_number < 1 {
            errors.add("pageNumber", "pageNumber must be at least 1");
        }
        if page_size < 1 {
            errors.add("pageSize", "pageSize must be at least 1");
        }
        errors.into_result()?;

        Ok(Self {
            filter_on: non_blank(filter_on),
            filter_query: non_blank(filter_query),
            sort_by: non_blank(sort_by),
            ascending: is_ascending.unwrap_or(true),
            page_number,
            page_size,
        })
    }

    /// The filter to apply, if both a known text field and a value were given.
    pub fn filter<F: QueryField>(&self) -> Option<(F, &str)> {
        let field = F::parse(self.filter_on.as_deref()?)?;
        let value = self.filter_query.as_deref()?;
        field.is_filterable().then_some((field, value))
    }

    /// The sort field, falling back to `default` for missing or unknown names.
    pub fn sort_field<F: QueryField>(&self, default: F) -> F {
        self.sort_by
            .as_deref()
            .and_then(F::parse)
            .unwrap_or(default)
    }

    /// Rows to skip before the requested page.
    pub fn offset(&self) -> i64 {
        (self.page_number - 1).saturating_mul(self.page_size)
    }

    /// Filter, sort, and page an in-memory collection.
    ///
    /// Ties on the sort field are broken by id so paging is deterministic.
    pub fn apply<E: Entity>(&self, mut items: Vec<E>) -> Vec<E> {
        if let Some((field, value)) = self.filter::<E::Field>() {
            let needle = value.to_lowercase();
            items.retain(|item| {
                item.field_text(field)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            });
        }

        let sort = self.sort_field(E::DEFAULT_SORT);
        items.sort_by(|a, b| {
            let ordering = a.compare_field(b, sort);
            let ordering = if self.ascending {
                ordering
            } else {
                ordering.reverse()
            };
            ordering.then_with(|| a.id().cmp(&b.id()))
        });

        let skip = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(self.page_size).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take).collect()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
