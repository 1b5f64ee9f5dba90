//! Data Transfer Objects handed to the panel frontend

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::{ListQuery, ListResult, PageWindow};

/// One rendered list page: rows, counts and the pager window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ListPageDto<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page_index: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
    pub window: PageWindow,
}

impl<T> ListPageDto<T> {
    pub fn new(result: ListResult<T>, query: &ListQuery, window: PageWindow) -> Self {
        Self {
            total_pages: result.total_pages(query.page_size),
            has_next: result.has_next(query),
            has_prev: ListResult::<T>::has_prev(query),
            total: result.total,
            items: result.items,
            page_index: query.page_index,
            page_size: query.page_size,
            window,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PageLabel;

    #[test]
    fn flags_follow_the_query_position() {
        let query = ListQuery::new(2, 10);
        let result = ListResult {
            items: vec!["k", "l"],
            total: 25,
        };
        let window = PageWindow::for_listing(2, 25, 10, 2).unwrap();

        let dto = ListPageDto::new(result, &query, window);
        assert_eq!(dto.total_pages, 3);
        assert!(dto.has_next);
        assert!(dto.has_prev);
        assert_eq!(dto.window.labels, vec![PageLabel::Page(1), PageLabel::Page(2), PageLabel::Page(3)]);
        assert!(!dto.is_empty());
    }

    #[test]
    fn serializes_in_camel_case() {
        let query = ListQuery::default();
        let dto = ListPageDto::new(
            ListResult::<u32> {
                items: Vec::new(),
                total: 0,
            },
            &query,
            PageWindow::for_listing(1, 0, 10, 2).unwrap(),
        );
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["pageIndex"], 1);
        assert_eq!(json["totalPages"], 0);
        assert_eq!(json["hasNext"], false);
        assert_eq!(json["window"]["startItem"], 0);
    }
}
