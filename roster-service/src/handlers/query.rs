//! Page and size parameters for list operations
//!
//! `page` and `size` arrive as loose strings. Anything that does not parse as
//! an integer falls back to the defaults; parsed values are then checked
//! against the accepted ranges. `page=0&size=0` asks for every row on a
//! single page.
//!
//! # Example
//!
//! ```rust
//! use roster_service::handlers::{paginate, PageRequest};
//!
//! let window = paginate(PageRequest::parse(Some("3"), Some("20")), 95).unwrap();
//! assert_eq!(window.limit, 20);
//! assert_eq!(window.offset, 40);
//! assert_eq!(window.page_count, 5);
//!
//! let everything = paginate(PageRequest::parse(Some("0"), Some("0")), 95).unwrap();
//! assert_eq!((everything.limit, everything.page, everything.page_count), (95, 1, 1));
//! ```

use std::collections::HashMap;

use crate::repository::Pagination;

/// Page used when `page` is absent or unparsable
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when `size` is absent or unparsable
pub const DEFAULT_SIZE: i64 = 10;

/// Largest accepted page size
pub const MAX_SIZE: i64 = 200;

/// Page and size values or sizes outside the accepted ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Requires valid page and size params")]
pub struct InvalidPagination;

/// Requested page and size after defaulting, before range checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_SIZE,
        }
    }
}

impl PageRequest {
    /// Parse raw parameter values, defaulting each one independently
    pub fn parse(page: Option<&str>, size: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|value| value.trim().parse::<i64>().ok());
        Self {
            page: parse(page).unwrap_or(DEFAULT_PAGE),
            size: parse(size).unwrap_or(DEFAULT_SIZE),
        }
    }

    /// Read `page` and `size` from a query string map
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self::parse(
            params.get("page").map(String::as_str),
            params.get("size").map(String::as_str),
        )
    }

    /// Page echoed in a rejected body, never below the first page
    pub fn reported_page(&self) -> u64 {
        u64::try_from(self.page).map_or(1, |page| page.max(1))
    }

    /// Check the request against the accepted ranges
    pub fn shape(&self) -> Result<PageShape, InvalidPagination> {
        match (self.page, self.size) {
            (0, 0) => Ok(PageShape::AllResults),
            (page, size) if page > 0 && size > 0 && size <= MAX_SIZE => Ok(PageShape::Window {
                page: page.unsigned_abs(),
                size: size.unsigned_abs(),
            }),
            _ => Err(InvalidPagination),
        }
    }
}

/// A validated page request that still needs the row count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageShape {
    /// One page of at most `size` rows
    Window { page: u64, size: u64 },
    /// Every row on a single page
    AllResults,
}

impl PageShape {
    /// Resolve the window once the filtered row count is known
    pub fn window(self, total: u64) -> PaginationWindow {
        match self {
            Self::Window { page, size } => PaginationWindow {
                limit: size,
                offset: (page - 1).saturating_mul(size),
                page,
                page_count: total.div_ceil(size),
            },
            Self::AllResults => PaginationWindow {
                limit: total,
                offset: 0,
                page: 1,
                page_count: 1,
            },
        }
    }
}

/// Limit, offset and reported page numbers for one list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationWindow {
    pub limit: u64,
    pub offset: u64,
    /// Page reported to the client; always at least 1
    pub page: u64,
    pub page_count: u64,
}

impl PaginationWindow {
    /// The limit/offset pair handed to the data source
    pub fn as_pagination(&self) -> Pagination {
        Pagination::new(self.offset, self.limit)
    }
}

/// Validate a page request and resolve it against a row count
pub fn paginate(request: PageRequest, total: u64) -> Result<PaginationWindow, InvalidPagination> {
    Ok(request.shape()?.window(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: i64, size: i64) -> PageRequest {
        PageRequest { page, size }
    }

    #[test]
    fn test_parse_defaults_unparsable_values() {
        assert_eq!(PageRequest::parse(None, None), PageRequest::default());
        assert_eq!(
            PageRequest::parse(Some("abc"), Some("7")),
            request(DEFAULT_PAGE, 7)
        );
        assert_eq!(
            PageRequest::parse(Some("2"), Some("")),
            request(2, DEFAULT_SIZE)
        );
        assert_eq!(PageRequest::parse(Some("-3"), Some("5")), request(-3, 5));
    }

    #[test]
    fn test_from_params() {
        let params = HashMap::from([
            ("page".to_string(), "4".to_string()),
            ("size".to_string(), "25".to_string()),
        ]);
        assert_eq!(PageRequest::from_params(&params), request(4, 25));
    }

    #[test]
    fn test_valid_window() {
        for (page, size) in [(1, 1), (1, 10), (3, 20), (7, 200)] {
            let window = paginate(request(page, size), 1_000).unwrap();
            assert_eq!(window.limit, size as u64);
            assert_eq!(window.offset, ((page - 1) * size) as u64);
            assert_eq!(window.page, page as u64);
        }
    }

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(paginate(request(1, 10), 0).unwrap().page_count, 0);
        assert_eq!(paginate(request(1, 10), 10).unwrap().page_count, 1);
        assert_eq!(paginate(request(1, 10), 11).unwrap().page_count, 2);
        assert_eq!(paginate(request(2, 3), 267).unwrap().page_count, 89);
    }

    #[test]
    fn test_all_results() {
        let window = paginate(request(0, 0), 42).unwrap();
        assert_eq!(
            window,
            PaginationWindow {
                limit: 42,
                offset: 0,
                page: 1,
                page_count: 1,
            }
        );

        let empty = paginate(request(0, 0), 0).unwrap();
        assert_eq!((empty.limit, empty.page, empty.page_count), (0, 1, 1));
    }

    #[test]
    fn test_invalid_combinations() {
        for (page, size) in [(1, 0), (1, 201), (1, -5), (0, 10), (-1, 10), (-1, 0), (0, 201)] {
            assert_eq!(
                paginate(request(page, size), 10),
                Err(InvalidPagination),
                "page={page} size={size}"
            );
        }
    }

    #[test]
    fn test_reported_page_is_at_least_one() {
        assert_eq!(request(-3, 5).reported_page(), 1);
        assert_eq!(request(0, 0).reported_page(), 1);
        assert_eq!(request(4, 500).reported_page(), 4);
    }

    #[test]
    fn test_invalid_pagination_message() {
        assert_eq!(
            InvalidPagination.to_string(),
            "Requires valid page and size params"
        );
    }

    #[test]
    fn test_as_pagination() {
        let window = paginate(request(3, 20), 100).unwrap();
        assert_eq!(window.as_pagination(), Pagination::new(40, 20));
    }
}
