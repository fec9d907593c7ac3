//! Fixed-size pagination over ranked results.

use serde::Serialize;

/// One page of a result list.
#[derive(Debug, Clone, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based, clamped to `[1, total_pages]`. Always 1 for an empty list.
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl<T> Page<'_, T> {
    /// Index of this page's first item within the full list.
    pub fn offset(&self) -> usize {
        self.current_page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Slice out `requested_page` of `items`.
///
/// Out-of-range pages are clamped rather than rejected, so a stale page
/// link still shows something. A `page_size` of zero is treated as one.
pub fn paginate<T>(items: &[T], requested_page: i64, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);

    let current_page = usize::try_from(requested_page)
        .unwrap_or(0)
        .clamp(1, total_pages.max(1));

    let start = ((current_page - 1) * page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);

    Page {
        items: &items[start..end],
        current_page,
        total_pages,
        total_items,
        page_size,
    }
}
