//! Pagination for list endpoints.
//!
//! List pages are page-based with a fixed page size shared by every entity:
//! `page` is 1-indexed and the offset is `PAGE_SIZE * (page - 1)`.
//!
//! # Example JSON Response
//!
//! ```json
//! {
//!   "data": [...],
//!   "meta": {
//!     "total": 42,
//!     "limit": 10,
//!     "offset": 20,
//!     "page": 3,
//!     "has_more": true
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Number of records on one list page.
pub const PAGE_SIZE: i64 = 10;

/// Parses the raw `page` query value. Anything that is not a positive
/// integer falls back to the first page.
#[must_use]
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Metadata about a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of records matching the query across all pages
    pub total: i64,
    /// Page size that was applied
    pub limit: i64,
    /// Number of records skipped
    pub offset: i64,
    /// Current page number (1-indexed)
    pub page: i64,
    /// Whether there are more records after this page
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(total: i64, limit: i64, offset: i64) -> Self {
        let page = if limit > 0 { offset / limit + 1 } else { 1 };
        Self {
            total,
            limit,
            offset,
            page,
            has_more: offset.saturating_add(limit) < total,
        }
    }
}
