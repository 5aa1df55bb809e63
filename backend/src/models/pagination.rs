//! Page window arithmetic for the user listing.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::User;

/// Page used when the client omits `page` or sends one below 1.
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when the client omits `pageSize` or sends one below 1.
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Upper bound on `pageSize`.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A normalized page request: `page >= 1`, `1 <= page_size <= MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl PageRequest {
    /// Clamp raw query values into a usable window.
    ///
    /// A page below 1 becomes 1. A page size below 1 falls back to the
    /// default of 10 rather than 1; anything above 100 is capped at 100.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = page.unwrap_or(DEFAULT_PAGE).max(1);
        let page_size = match page_size.unwrap_or(DEFAULT_PAGE_SIZE) {
            size if size < 1 => DEFAULT_PAGE_SIZE,
            size => size.min(MAX_PAGE_SIZE),
        };
        Self { page, page_size }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Rows to skip before this page starts.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Rows to take.
    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination metadata returned alongside a page of users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: i64,
    pub page_size: i64,
    pub total_users: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PaginationMeta {
    pub fn new(request: PageRequest, total_users: i64) -> Self {
        let total_pages = total_pages(total_users, request.page_size());
        Self {
            current_page: request.page(),
            page_size: request.page_size(),
            total_users,
            total_pages,
            has_next: request.page() < total_pages,
            has_previous: request.page() > 1,
        }
    }
}

/// `ceil(total / page_size)`; zero rows means zero pages.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if total <= 0 || page_size <= 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}

/// A page of users plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserPage {
    pub data: Vec<User>,
    pub pagination: PaginationMeta,
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod pagination_tests;
