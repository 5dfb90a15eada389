//! Shared query parameter types for API handlers.

use prsk_core::pagination::PageRequest;
use prsk_core::resource::Resource;
use serde::Deserialize;

use crate::error::AppResult;

/// Listing parameters (`?page=&limit=&sort_by=&direction=`).
///
/// Values are clamped and the sort field checked against the resource's
/// sortable columns by [`PageRequest::resolve`].
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

impl ListParams {
    pub fn page_request<R: Resource>(&self) -> AppResult<PageRequest> {
        Ok(PageRequest::resolve(
            R::SORTABLE,
            self.page,
            self.limit,
            self.sort_by.as_deref(),
            self.direction.as_deref(),
        )?)
    }
}
