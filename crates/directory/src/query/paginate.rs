//! Fixed-size paging over an ordered result list.

use std::ops::Range;

/// Page size used when a state asks for zero.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page size actually used for a requested size.
pub fn effective_page_size(page_size: usize) -> usize {
    if page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    }
}

/// Number of pages needed for `total` items; zero items means zero pages.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(effective_page_size(page_size))
}

/// Index range of a 1-indexed page.
///
/// Page 0 and pages past the end yield an empty range.
pub fn page_range(total: usize, page_number: usize, page_size: usize) -> Range<usize> {
    let page_size = effective_page_size(page_size);
    if page_number == 0 {
        return 0..0;
    }
    let start = (page_number - 1).saturating_mul(page_size);
    if start >= total {
        return 0..0;
    }
    start..start.saturating_add(page_size).min(total)
}

/// Keeps only the items of one page.
pub fn paginate<T>(mut items: Vec<T>, page_number: usize, page_size: usize) -> Vec<T> {
    let range = page_range(items.len(), page_number, page_size);
    items.truncate(range.end);
    items.drain(..range.start);
    items
}
