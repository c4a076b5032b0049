//! Pagination window
//!
//! Which page links a listing shows: the first page, the last page and the
//! pages next to the current one, with an ellipsis wherever numbers are
//! skipped.

use crate::domain::dto::PaginatedResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page { number: u32, current: bool },
    Ellipsis,
}

/// Links around a page listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub previous: Option<u32>,
    pub items: Vec<PageItem>,
    pub next: Option<u32>,
}

/// Visible page items for `current` of `total_pages`
pub fn page_window(current: u32, total_pages: u32) -> Vec<PageItem> {
    let mut pages: Vec<u32> = [
        1,
        current.saturating_sub(1),
        current,
        current.saturating_add(1),
        total_pages,
    ]
    .into_iter()
    .filter(|page| (1..=total_pages).contains(page))
    .collect();
    pages.sort_unstable();
    pages.dedup();

    let mut items = Vec::with_capacity(pages.len() * 2);
    let mut last_shown: Option<u32> = None;
    for page in pages {
        if last_shown.is_some_and(|last| page - last > 1) {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page {
            number: page,
            current: page == current,
        });
        last_shown = Some(page);
    }

    items
}

impl<T> PaginatedResponse<T> {
    /// Window for this page, with previous/next when the backend allows them
    pub fn window(&self) -> PageWindow {
        PageWindow {
            previous: self
                .has_previous_page
                .then(|| self.page_number.saturating_sub(1))
                .filter(|p| *p > 0),
            items: page_window(self.page_number, self.total_pages),
            next: self
                .has_next_page
                .then(|| self.page_number.checked_add(1))
                .flatten(),
        }
    }
}
