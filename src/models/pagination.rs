//! Pagination primitives shared across all list endpoints.
//!
//! Lists are fetched with one row more than the page size. If that extra row
//! comes back, a next page exists; the row itself is never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Pagination query parameters (`?page=&limit=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    /// Maximum items per page.
    const MAX_LIMIT: i64 = 100;

    /// Default items per page, shared by every resource.
    pub const DEFAULT_LIMIT: i64 = 10;

    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        (self.current_page() - 1).saturating_mul(self.limit())
    }

    pub fn current_page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Number of rows to request from storage: one page plus the sentinel row.
    pub fn fetch_limit(&self) -> i64 {
        self.limit() + 1
    }

    /// Turn an over-fetched window into a page using these parameters.
    pub fn page_of<T>(&self, window: Vec<T>) -> PageResult<T> {
        paginate(window, self.current_page(), self.limit(), self.offset())
    }
}

/// A bounded slice of a listing plus backward/forward page markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<i64>,
}

impl<T> PageResult<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transform each item, keeping the page markers.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            prev_page: self.prev_page,
            next_page: self.next_page,
        }
    }
}

/// Derive page markers from a window fetched as `limit + 1` rows at `offset`.
///
/// `next_page` is set iff the window holds more than `limit` rows, in which
/// case the surplus is dropped. `prev_page` is set iff `offset > 0`.
pub fn paginate<T>(mut window: Vec<T>, page: i64, limit: i64, offset: i64) -> PageResult<T> {
    let limit = usize::try_from(limit).unwrap_or(0);

    let next_page = if window.len() > limit {
        window.truncate(limit);
        Some(page + 1)
    } else {
        None
    };

    let prev_page = (offset > 0).then(|| page - 1);

    PageResult {
        items: window,
        prev_page,
        next_page,
    }
}

/// Page an already ordered in-memory collection.
///
/// Takes the same `limit + 1` window a storage query would return, so the
/// markers come from [`paginate`] like every other listing.
pub fn slice_page<T>(items: Vec<T>, pagination: &Pagination) -> PageResult<T> {
    let offset = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(pagination.fetch_limit()).unwrap_or(0);
    let window: Vec<T> = items.into_iter().skip(offset).take(take).collect();
    pagination.page_of(window)
}

/// Empty pages are answered with `204 No Content` and no body.
impl<T: Serialize> IntoResponse for PageResult<T> {
    fn into_response(self) -> Response {
        if self.is_empty() {
            StatusCode::NO_CONTENT.into_response()
        } else {
            Json(self).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let p = Pagination::default();
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.fetch_limit(), 11);
    }

    #[test]
    fn pagination_clamps_limit_and_page() {
        let p = Pagination {
            page: Some(-3),
            limit: Some(500),
        };
        assert_eq!(p.limit(), 100);
        assert_eq!(p.current_page(), 1);

        let p = Pagination::new(1, 0);
        assert_eq!(p.limit(), 1);
    }

    #[test]
    fn pagination_offset_calculation() {
        assert_eq!(Pagination::new(3, 10).offset(), 20);
    }

    #[test]
    fn full_window_sets_next_page_and_drops_sentinel() {
        let window: Vec<i32> = (1..=11).collect();
        let page = paginate(window, 1, 10, 0);
        assert_eq!(page.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(page.next_page, Some(2));
        assert_eq!(page.prev_page, None);
    }

    #[test]
    fn short_window_at_offset_sets_only_prev_page() {
        let window: Vec<i32> = (1..=5).collect();
        let page = paginate(window, 2, 10, 10);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.next_page, None);
        assert_eq!(page.prev_page, Some(1));
    }

    #[test]
    fn exactly_limit_rows_has_no_next_page() {
        let page = paginate(vec![1, 2, 3], 1, 3, 0);
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn empty_window_is_empty_page() {
        let page = paginate(Vec::<i32>::new(), 4, 10, 30);
        assert!(page.is_empty());
        assert_eq!(page.next_page, None);
        assert_eq!(page.prev_page, Some(3));
    }

    #[test]
    fn paginate_is_idempotent() {
        let first = paginate(vec!["a", "b", "c"], 2, 2, 2);
        let second = paginate(vec!["a", "b", "c"], 2, 2, 2);
        assert_eq!(first, second);
    }

    #[test]
    fn slice_page_matches_full_set_convention() {
        let items: Vec<i32> = (1..=25).collect();

        let page1 = slice_page(items.clone(), &Pagination::new(1, 10));
        assert_eq!(page1.items, (1..=10).collect::<Vec<_>>());
        assert_eq!((page1.prev_page, page1.next_page), (None, Some(2)));

        let page3 = slice_page(items.clone(), &Pagination::new(3, 10));
        assert_eq!(page3.items, (21..=25).collect::<Vec<_>>());
        assert_eq!((page3.prev_page, page3.next_page), (Some(2), None));

        let beyond = slice_page(items, &Pagination::new(9, 10));
        assert!(beyond.is_empty());
    }

    #[test]
    fn slice_page_with_exact_multiple_has_no_next_page() {
        let items: Vec<i32> = (1..=20).collect();
        let page2 = slice_page(items, &Pagination::new(2, 10));
        assert_eq!(page2.items.len(), 10);
        assert_eq!(page2.next_page, None);
    }

    #[test]
    fn page_markers_serialize_camel_case_and_skip_absent() {
        let page = paginate(vec![1, 2], 2, 1, 1);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["prevPage"], 1);
        assert_eq!(json["nextPage"], 3);

        let json = serde_json::to_value(paginate(vec![1], 1, 1, 0)).unwrap();
        assert!(json.get("prevPage").is_none());
        assert!(json.get("nextPage").is_none());
    }

    #[test]
    fn empty_page_responds_no_content() {
        let response = PageResult::<i32> {
            items: vec![],
            prev_page: None,
            next_page: None,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = paginate(vec![1], 1, 10, 0).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
