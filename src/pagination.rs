use serde::Serialize;

use crate::domain::table::PageState;

/// Links always shown at the start and end of the pagination bar.
const EDGE_LINKS: usize = 2;
/// Links shown before and after the current page.
const LINKS_BEFORE_CURRENT: usize = 2;
const LINKS_AFTER_CURRENT: usize = 4;

/// Labels for the pagination bar, 1-based, with `None` standing for a run of
/// hidden pages. The first and last `EDGE_LINKS` pages are always listed,
/// plus a window around `current_page`. A `current_page` past the last page
/// leaves only the edges.
fn page_links(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    let window_start = current_page.saturating_sub(LINKS_BEFORE_CURRENT);
    let window_end = current_page.saturating_add(LINKS_AFTER_CURRENT);
    let is_shown = |page: usize| {
        page <= EDGE_LINKS
            || page > total_pages.saturating_sub(EDGE_LINKS)
            || (window_start..=window_end).contains(&page)
    };

    let mut links = Vec::new();
    for page in 1..=total_pages {
        if is_shown(page) {
            links.push(Some(page));
        } else if links.last() != Some(&None) {
            links.push(None);
        }
    }
    links
}

/// One fetched page of rows plus what the pagination control needs.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// 1-based labels, `None` for an ellipsis.
    pub pages: Vec<Option<usize>>,
    /// Zero-based index of `items` within the result set.
    pub page_index: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    /// Wraps the rows of `page` out of `total` matching records.
    pub fn new(items: Vec<T>, page: &PageState, total: usize) -> Self {
        let page_size = page.page_size.get();
        let total_pages = total.div_ceil(page_size);
        let pages = page_links(total_pages, page.page_index.saturating_add(1));

        Self {
            items,
            pages,
            page_index: page.page_index,
            page_size,
            total,
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index.saturating_add(1) < self.total_pages
    }

    /// Whether the requested page lies past the end of the result set.
    pub fn is_out_of_range(&self) -> bool {
        self.page_index > 0 && self.page_index >= self.total_pages
    }

    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pages: self.pages,
            page_index: self.page_index,
            page_size: self.page_size,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}
