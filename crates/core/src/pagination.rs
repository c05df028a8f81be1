//! Page/limit pagination shared by every list endpoint.
//!
//! `limit=0` or `limit=all` disables pagination entirely: all rows come back
//! as a single page whose `per_page` equals the total row count.

use serde::Serialize;

use crate::error::CoreError;

/// Upper bound on a single page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Sentinel value that disables pagination.
pub const LIMIT_ALL: &str = "all";

/// A parsed pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: i64,
    /// Rows per page; `None` returns every row.
    pub limit: Option<i64>,
}

impl PageRequest {
    /// Parse raw `page` / `limit` query values.
    pub fn parse(
        page: Option<i64>,
        limit: Option<&str>,
        default_limit: i64,
    ) -> Result<Self, CoreError> {
        let limit = match limit.map(str::trim) {
            None | Some("") => Some(default_limit),
            Some(v) if v.eq_ignore_ascii_case(LIMIT_ALL) => None,
            Some(v) => {
                let n: i64 = v.parse().map_err(|_| {
                    CoreError::Validation(format!(
                        "limit must be a number or '{LIMIT_ALL}' (got '{v}')"
                    ))
                })?;
                match n {
                    0 => None,
                    n if n < 0 => {
                        return Err(CoreError::Validation(format!(
                            "limit must not be negative (got {n})"
                        )))
                    }
                    n => Some(n.min(MAX_PAGE_LIMIT)),
                }
            }
        };

        let page = if limit.is_none() {
            1
        } else {
            page.unwrap_or(1).max(1)
        };

        Ok(Self { page, limit })
    }

    /// Request every row on a single page.
    pub fn all() -> Self {
        Self {
            page: 1,
            limit: None,
        }
    }

    /// Row offset for SQL `OFFSET`.
    pub fn offset(&self) -> i64 {
        match self.limit {
            Some(limit) => (self.page - 1).saturating_mul(limit),
            None => 0,
        }
    }

    /// Build the response metadata once the total row count is known.
    pub fn meta(&self, total: i64) -> PageMeta {
        match self.limit {
            None => PageMeta {
                total_data: total,
                current_page: 1,
                per_page: total,
                total_pages: 1,
                has_next: false,
                has_prev: false,
            },
            Some(limit) => {
                let total_pages = (total + limit - 1) / limit;
                PageMeta {
                    total_data: total,
                    current_page: self.page,
                    per_page: limit,
                    total_pages,
                    has_next: self.page < total_pages,
                    has_prev: self.page > 1,
                }
            }
        }
    }
}

/// Pagination metadata returned next to list results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total_data: i64,
    pub current_page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let req = PageRequest::parse(None, None, 10).unwrap();
        assert_eq!(req, PageRequest { page: 1, limit: Some(10) });
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn offset_from_page() {
        let req = PageRequest::parse(Some(3), Some("20"), 10).unwrap();
        assert_eq!(req.offset(), 40);
    }

    #[test]
    fn page_floors_at_one() {
        let req = PageRequest::parse(Some(-4), Some("5"), 10).unwrap();
        assert_eq!(req.page, 1);
    }

    #[test]
    fn limit_is_capped() {
        let req = PageRequest::parse(None, Some("1000"), 10).unwrap();
        assert_eq!(req.limit, Some(MAX_PAGE_LIMIT));
    }

    #[test]
    fn zero_and_all_disable_pagination() {
        for raw in ["0", "all", "ALL"] {
            let req = PageRequest::parse(Some(4), Some(raw), 10).unwrap();
            assert_eq!(req.limit, None, "limit={raw}");
            assert_eq!(req.page, 1);
            assert_eq!(req.offset(), 0);
            let meta = req.meta(37);
            assert_eq!(meta.current_page, 1);
            assert_eq!(meta.per_page, 37);
            assert_eq!(meta.total_pages, 1);
            assert!(!meta.has_next);
        }
    }

    #[test]
    fn invalid_limit_is_rejected() {
        assert!(PageRequest::parse(None, Some("ten"), 10).is_err());
        assert!(PageRequest::parse(None, Some("-1"), 10).is_err());
    }

    #[test]
    fn meta_for_middle_page() {
        let req = PageRequest::parse(Some(2), Some("10"), 10).unwrap();
        let meta = req.meta(25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn meta_for_last_page() {
        let req = PageRequest::parse(Some(3), Some("10"), 10).unwrap();
        let meta = req.meta(25);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn meta_for_empty_result() {
        let meta = PageRequest::parse(None, None, 10).unwrap().meta(0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }
}
