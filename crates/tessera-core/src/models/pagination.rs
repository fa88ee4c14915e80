use serde::Serialize;

use crate::constants::PAGE_SIZE_ALL;

/// Page number and page size derived once per request from the `page` and
/// `pageSize` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    pub page: i64,
    pub page_size: i64,
}

impl PageQuery {
    /// Parse raw query values.
    ///
    /// - `page` defaults to 1 and is clamped to a minimum of 1.
    /// - `page_size` defaults to `max_page_size` and is clamped to it; `-1`
    ///   and any other non-positive value also mean `max_page_size`.
    /// - Non-numeric input is read as 0 and then clamped by the same rules.
    pub fn parse(page: Option<&str>, page_size: Option<&str>, max_page_size: i64) -> Self {
        Self {
            page: parse_page(page),
            page_size: parse_page_size(page_size, max_page_size),
        }
    }

    /// Row offset for SQL `OFFSET`
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Row count for SQL `LIMIT`
    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

fn parse_number(raw: &str) -> i64 {
    raw.parse::<i64>().unwrap_or(0)
}

fn parse_page(raw: Option<&str>) -> i64 {
    let page = match raw {
        None | Some("") => 1,
        Some(value) => parse_number(value),
    };
    page.max(1)
}

fn parse_page_size(raw: Option<&str>, max_page_size: i64) -> i64 {
    let max_page_size = max_page_size.max(1);
    let page_size = match raw {
        None | Some("") => PAGE_SIZE_ALL,
        Some(value) => parse_number(value),
    };

    if page_size <= 0 || page_size > max_page_size {
        max_page_size
    } else {
        page_size
    }
}

/// Pager state for rendering navigation around a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PageInfo {
    pub fn new(query: PageQuery, total: i64) -> Self {
        let total = total.max(0);
        let total_pages = if total == 0 {
            1
        } else {
            (total + query.page_size - 1) / query.page_size
        };

        Self {
            page: query.page,
            page_size: query.page_size,
            total,
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn previous(&self) -> i64 {
        (self.page - 1).max(1)
    }

    pub fn next(&self) -> i64 {
        self.page + 1
    }
}
