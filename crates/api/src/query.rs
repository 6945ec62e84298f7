//! Query-string parameters of the list endpoints.

use nzwalks_core::error::CoreError;
use nzwalks_core::query::ListQuery;
use serde::Deserialize;

/// `?filterOn=&filterQuery=&sortBy=&isAscending=&pageNumber=&pageSize=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub filter_on: Option<String>,
    pub filter_query: Option<String>,
    pub sort_by: Option<String>,
    pub is_ascending: Option<bool>,
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

impl ListParams {
    pub fn into_query(self) -> Result<ListQuery, CoreError> {
        ListQuery::new(
            self.filter_on,
            self.filter_query,
            self.sort_by,
            self.is_ascending,
            self.page_number,
            self.page_size,
        )
    }
}
