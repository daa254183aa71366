//! Page-number pagination for list endpoints
//!
//! [`PageRequest`] turns untrusted page/limit input into a bounded request
//! and [`Page`] is the envelope returned to clients:
//!
//! ```json
//! { "data": [], "total": 6, "page": 2, "limit": 5,
//!   "totalPages": 2, "hasNext": false, "hasPrev": true }
//! ```

use serde::{Deserialize, Serialize};

use crate::repository::Pagination;

/// Page size used when the client does not ask for one
pub const DEFAULT_LIMIT: u64 = 5;

/// Largest page size a client can request
pub const MAX_LIMIT: u64 = 100;

/// A clamped page request
///
/// `page >= 1` and `1 <= limit <= MAX_LIMIT` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-indexed page number
    pub page: u64,
    /// Items per page
    pub limit: u64,
}

impl PageRequest {
    /// Clamp raw input
    ///
    /// Missing or non-positive pages become 1. Missing limits fall back to
    /// `default_limit`; anything else is clamped into `[1, MAX_LIMIT]`.
    ///
    /// ```rust
    /// use lens_catalog::pagination::PageRequest;
    ///
    /// let request = PageRequest::resolve(Some(-3), Some(500), 5);
    /// assert_eq!((request.page, request.limit), (1, 100));
    /// ```
    #[must_use]
    pub fn resolve(page: Option<i64>, limit: Option<i64>, default_limit: u64) -> Self {
        let page = page.unwrap_or(1).max(1).unsigned_abs();
        let limit = match limit {
            Some(limit) => limit.clamp(1, MAX_LIMIT as i64).unsigned_abs(),
            None => default_limit.clamp(1, MAX_LIMIT),
        };
        Self { page, limit }
    }

    /// Offset/limit window for the repository
    #[must_use]
    pub fn window(&self) -> Pagination {
        Pagination::page(self.page, self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of results plus navigation metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    pub data: Vec<T>,
    /// Matching items across all pages
    pub total: u64,
    /// Current page (1-indexed)
    pub page: u64,
    /// Page size used
    pub limit: u64,
    /// `ceil(total / limit)`; 0 when nothing matched
    pub total_pages: u64,
    /// `page < total_pages`
    pub has_next: bool,
    /// `page > 1`
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// Build a page, deriving the navigation fields
    #[must_use]
    pub fn new(data: Vec<T>, total: u64, request: PageRequest) -> Self {
        let total_pages = calculate_total_pages(total, request.limit);
        Self {
            data,
            total,
            page: request.page,
            limit: request.limit,
            total_pages,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }
}

/// Calculate total pages, rounding up
fn calculate_total_pages(total: u64, limit: u64) -> u64 {
    total.div_ceil(limit.max(1))
}
