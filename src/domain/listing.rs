//! Search and pagination over progress rows

use crate::domain::{AppData, ProgressData};
use serde::Serialize;

/// Page sizes offered by the dashboard
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

/// Width of the page-number window
const PAGE_WINDOW: usize = 5;

/// Rows whose OPD name contains `term` (case-insensitive), in progress order.
///
/// Rows without a matching OPD never match.
pub fn search<'a>(data: &'a AppData, term: &str) -> Vec<&'a ProgressData> {
    data.progress
        .iter()
        .filter(|p| data.opd(&p.opd_id).is_some_and(|o| o.matches(term)))
        .collect()
}

/// Position of one page within a filtered listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total_entries: usize,
    pub total_pages: usize,
    /// 1-based index of the first row shown, 0 when empty
    pub start_entry: usize,
    pub end_entry: usize,
    pub page_numbers: Vec<usize>,
}

impl Pagination {
    /// Clamp `page` into range and compute the visible window.
    pub fn new(total_entries: usize, page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_entries.div_ceil(page_size);
        let page = page.clamp(1, total_pages.max(1));

        let start_entry = if total_entries == 0 {
            0
        } else {
            (page - 1) * page_size + 1
        };
        let end_entry = (page * page_size).min(total_entries);

        Pagination {
            page,
            page_size,
            total_entries,
            total_pages,
            start_entry,
            end_entry,
            page_numbers: page_window(page, total_pages),
        }
    }

    /// Offset of the first row on this page
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }

    /// The slice of `items` that falls on this page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// At most five page numbers around `page`, shifted left near the end.
fn page_window(page: usize, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }
    let mut start = page.saturating_sub(2).max(1);
    let end = (start + PAGE_WINDOW - 1).min(total_pages);
    if end + 1 - start < PAGE_WINDOW {
        start = (end + 1).saturating_sub(PAGE_WINDOW).max(1);
    }
    (start..=end).collect()
}
