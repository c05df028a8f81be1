//! Shared query parameter types for API handlers.

use lisan_core::pagination::PageRequest;
use lisan_core::search::SortOrder;
use serde::Deserialize;

use crate::error::AppResult;

/// Default page size when `limit` is absent.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Pagination parameters (`?page=&limit=`).
///
/// `limit` is kept as a string so `limit=all` can be expressed.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<String>,
}

impl PageParams {
    pub fn to_request(&self) -> AppResult<PageRequest> {
        self.to_request_with_default(DEFAULT_PAGE_LIMIT)
    }

    pub fn to_request_with_default(&self, default_limit: i64) -> AppResult<PageRequest> {
        Ok(PageRequest::parse(
            self.page,
            self.limit.as_deref(),
            default_limit,
        )?)
    }
}

/// Sorting parameters (`?sort_by=&order=`).
#[derive(Debug, Default, Deserialize)]
pub struct SortParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl SortParams {
    /// Requested direction, descending unless `order=asc`.
    pub fn order(&self) -> SortOrder {
        SortOrder::parse_or(self.order.as_deref(), SortOrder::Desc)
    }
}

/// `?limit=` for the short top-N lists.
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

impl LimitParams {
    /// Clamp to `1..=max`, defaulting to `default`.
    pub fn clamped(&self, default: i64, max: i64) -> i64 {
        self.limit.unwrap_or(default).clamp(1, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_params_default_limit() {
        let req = PageParams::default().to_request().unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, Some(DEFAULT_PAGE_LIMIT));
    }

    #[test]
    fn page_params_all() {
        let params = PageParams {
            page: Some(3),
            limit: Some("all".into()),
        };
        let req = params.to_request().unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, None);
    }

    #[test]
    fn page_params_rejects_garbage() {
        let params = PageParams {
            page: None,
            limit: Some("ten".into()),
        };
        assert!(params.to_request().is_err());
    }

    #[test]
    fn sort_params_default_desc() {
        assert_eq!(SortParams::default().order(), SortOrder::Desc);
        let asc = SortParams {
            sort_by: None,
            order: Some("asc".into()),
        };
        assert_eq!(asc.order(), SortOrder::Asc);
    }

    #[test]
    fn limit_params_clamp() {
        assert_eq!(LimitParams { limit: None }.clamped(10, 50), 10);
        assert_eq!(LimitParams { limit: Some(0) }.clamped(10, 50), 1);
        assert_eq!(LimitParams { limit: Some(500) }.clamped(10, 50), 50);
    }
}
