//! Pager window computation.
//!
//! Responsibility:
//! - which page links a pagination control renders (first, last, the current
//!   page's neighbours, ellipsis markers for the collapsed ranges)
//! - the 1-based item range for the "showing X–Y of Z" caption
//!
//! The window never holds more than `2 * neighbor_radius + 5` labels, so a pager
//! over 10,000 pages is as wide as one over 10.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::errors::{EngineResult, ListError};
use crate::domain::query::total_pages;

pub const DEFAULT_NEIGHBOR_RADIUS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "page", rename_all = "camelCase")]
#[ts(export)]
pub enum PageLabel {
    Page(u32),
    /// Collapsed run of pages; rendered, never clickable.
    Ellipsis,
}

impl PageLabel {
    pub const fn page(self) -> Option<u32> {
        match self {
            Self::Page(page) => Some(page),
            Self::Ellipsis => None,
        }
    }

    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::Page(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PageWindow {
    pub labels: Vec<PageLabel>,
    /// First item on the page, 1-based; `0` for an empty list.
    pub start_item: usize,
    /// Last item on the page, inclusive; `0` for an empty list.
    pub end_item: usize,
}

impl PageWindow {
    /// Window for a list of `total_items`, deriving the page count from the
    /// page size.
    pub fn for_listing(
        current_page: u32,
        total_items: usize,
        page_size: u32,
        neighbor_radius: u32,
    ) -> EngineResult<Self> {
        PageWindowCalculator::new(neighbor_radius).compute(
            current_page,
            total_pages(total_items, page_size),
            total_items,
            page_size,
        )
    }

    pub fn pages(&self) -> impl Iterator<Item = u32> + '_ {
        self.labels.iter().filter_map(|label| label.page())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindowCalculator {
    neighbor_radius: u32,
}

impl Default for PageWindowCalculator {
    fn default() -> Self {
        Self {
            neighbor_radius: DEFAULT_NEIGHBOR_RADIUS,
        }
    }
}

impl PageWindowCalculator {
    pub const fn new(neighbor_radius: u32) -> Self {
        Self { neighbor_radius }
    }

    /// Largest number of labels any window from this calculator can hold.
    pub const fn max_labels(&self) -> usize {
        (self.neighbor_radius as usize).saturating_mul(2).saturating_add(5)
    }

    /// Builds the pager labels and caption range.
    ///
    /// `current_page` must lie in `1..=max(total_pages, 1)` and `page_size`
    /// must be positive; the calculator reports bad input instead of clamping.
    pub fn compute(
        &self,
        current_page: u32,
        total_pages: u32,
        total_items: usize,
        page_size: u32,
    ) -> EngineResult<PageWindow> {
        if page_size == 0 {
            return Err(ListError::invalid_paging_state("page_size must be >= 1"));
        }
        let last_page = total_pages.max(1);
        if current_page == 0 || current_page > last_page {
            return Err(ListError::invalid_paging_state(format!(
                "current page {current_page} is outside 1..={last_page}"
            )));
        }

        let labels = self.labels(current_page, total_pages);
        let (start_item, end_item) = item_range(current_page, total_items, page_size);

        Ok(PageWindow {
            labels,
            start_item,
            end_item,
        })
    }

    fn labels(&self, current_page: u32, total_pages: u32) -> Vec<PageLabel> {
        match total_pages {
            0 => return Vec::new(),
            1 => return vec![PageLabel::Page(1)],
            _ => {}
        }

        // Signed arithmetic so `current - radius` may go below 1.
        let current = i64::from(current_page);
        let radius = i64::from(self.neighbor_radius);
        let last = i64::from(total_pages);

        let mut labels = Vec::new();
        labels.push(PageLabel::Page(1));
        if current - radius > 2 {
            labels.push(PageLabel::Ellipsis);
        }

        let from = (current - radius).max(2);
        let to = (current + radius).min(last - 1);
        labels.extend(
            (from..=to)
                .filter_map(|page| u32::try_from(page).ok())
                .map(PageLabel::Page),
        );

        if current + radius < last - 1 {
            labels.push(PageLabel::Ellipsis);
        }
        labels.push(PageLabel::Page(total_pages));
        labels
    }
}

/// 1-based inclusive item range of `current_page`, clamped to `total_items`.
fn item_range(current_page: u32, total_items: usize, page_size: u32) -> (usize, usize) {
    if total_items == 0 {
        return (0, 0);
    }
    let page = usize::try_from(current_page).unwrap_or(usize::MAX);
    let size = usize::try_from(page_size).unwrap_or(usize::MAX);
    let start = page.saturating_sub(1).saturating_mul(size).saturating_add(1);
    let end = page.saturating_mul(size).min(total_items);
    (start.min(total_items), end)
}
