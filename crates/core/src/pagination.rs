//! Paging and sorting for live-record listings.
//!
//! This module lives in `core` (zero internal deps) so both the repository
//! layer and the in-memory store interpret a page request identically.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default number of records per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum number of records per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Sort field used when the caller does not name one.
pub const DEFAULT_SORT_FIELD: &str = "id";

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// A field a listing may be ordered by.
///
/// `field` is the name clients send; `column` is the storage column. Only
/// columns declared this way ever reach an `ORDER BY` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortColumn {
    pub field: &'static str,
    pub column: &'static str,
}

impl SortColumn {
    pub const fn new(field: &'static str, column: &'static str) -> Self {
        Self { field, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any casing sorts descending; anything else sorts ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Requests and results
// ---------------------------------------------------------------------------

/// A validated page request. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
    pub sort: SortColumn,
    pub direction: SortDirection,
}

impl PageRequest {
    /// Build a page request from raw client input.
    ///
    /// Fails with [`CoreError::Validation`] when `sort_by` is not one of
    /// `sortable`.
    pub fn resolve(
        sortable: &[SortColumn],
        page: Option<i64>,
        limit: Option<i64>,
        sort_by: Option<&str>,
        direction: Option<&str>,
    ) -> Result<Self, CoreError> {
        let field = sort_by.unwrap_or(DEFAULT_SORT_FIELD);
        let sort = sortable
            .iter()
            .find(|c| c.field == field)
            .copied()
            .ok_or_else(|| {
                let allowed: Vec<&str> = sortable.iter().map(|c| c.field).collect();
                CoreError::Validation(format!(
                    "Unknown sort field '{field}'. Allowed: {}",
                    allowed.join(", ")
                ))
            })?;

        Ok(Self {
            page: clamp_page(page),
            limit: clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
            sort,
            direction: SortDirection::parse(direction),
        })
    }

    /// Number of records to skip.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Pagination metadata returned with every listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total_count: i64,
    pub total_pages: i64,
}

/// One page of live records.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: &PageRequest, total_count: i64) -> Self {
        Self {
            items,
            meta: PageMeta {
                page: request.page,
                limit: request.limit,
                total_count,
                total_pages: total_pages(total_count, request.limit),
            },
        }
    }

    /// Convert the items, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided 1-based page number.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Number of pages needed to show `total_count` records, `limit` at a time.
pub fn total_pages(total_count: i64, limit: i64) -> i64 {
    if total_count <= 0 || limit <= 0 {
        return 0;
    }
    (total_count + limit - 1) / limit
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const SORTABLE: &[SortColumn] = &[
        SortColumn::new("id", "id"),
        SortColumn::new("artist_name", "artist_name"),
    ];

    // -- clamp_limit ---------------------------------------------------------

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 20, 100), 20);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(200), 20, 100), 100);
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(-5), 20, 100), 1);
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
    }

    // -- clamp_page ----------------------------------------------------------

    #[test]
    fn clamp_page_defaults_to_first_page() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(3)), 3);
    }

    // -- total_pages ---------------------------------------------------------

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(5, 2), 3);
    }

    // -- SortDirection -------------------------------------------------------

    #[test]
    fn direction_is_case_insensitive_and_defaults_to_asc() {
        assert_eq!(SortDirection::parse(Some("DESC")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("desc")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("sideways")), SortDirection::Asc);
        assert_eq!(SortDirection::parse(None), SortDirection::Asc);
    }

    // -- PageRequest ---------------------------------------------------------

    #[test]
    fn resolve_applies_defaults() {
        let req = PageRequest::resolve(SORTABLE, None, None, None, None).unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(req.sort.column, "id");
        assert_eq!(req.direction, SortDirection::Asc);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn resolve_computes_offset_from_page() {
        let req =
            PageRequest::resolve(SORTABLE, Some(3), Some(10), Some("artist_name"), Some("desc"))
                .unwrap();
        assert_eq!(req.offset(), 20);
        assert_eq!(req.sort.column, "artist_name");
        assert_eq!(req.direction, SortDirection::Desc);
    }

    #[test]
    fn resolve_rejects_unknown_sort_field() {
        let err = PageRequest::resolve(SORTABLE, None, None, Some("password"), None).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("password"));
    }

    #[test]
    fn page_meta_reports_totals() {
        let req = PageRequest::resolve(SORTABLE, Some(2), Some(2), None, None).unwrap();
        let page = Page::new(vec![1, 2], &req, 5);
        assert_eq!(page.meta.page, 2);
        assert_eq!(page.meta.limit, 2);
        assert_eq!(page.meta.total_count, 5);
        assert_eq!(page.meta.total_pages, 3);
        assert_eq!(page.map(|n| n * 10).items, vec![10, 20]);
    }
}
