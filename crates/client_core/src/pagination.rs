//! Pagination descriptor derived from listing response metadata.

use shared::protocol::ProductPage;

use crate::query::QuerySpec;

/// Width of the sliding window of consecutive page numbers.
pub const MAX_PAGES_SHOWN: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    Page { number: u32, active: bool },
    Ellipsis,
}

/// A previous/next arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub target: u32,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub total_pages: u32,
    pub current_page: u32,
    pub previous: PageLink,
    pub next: PageLink,
    pub entries: Vec<PageEntry>,
}

impl PageWindow {
    pub fn page_numbers(&self) -> Vec<u32> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                PageEntry::Page { number, .. } => Some(*number),
                PageEntry::Ellipsis => None,
            })
            .collect()
    }

    pub fn has_ellipsis(&self) -> bool {
        self.entries.contains(&PageEntry::Ellipsis)
    }
}

/// What the listing renders below the product grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pagination {
    /// Category results are unpaginated.
    Hidden,
    Window(PageWindow),
}

impl Pagination {
    pub fn for_response(spec: &QuerySpec, page: &ProductPage) -> Self {
        let Some((page_size, offset)) = spec.window() else {
            return Pagination::Hidden;
        };

        let total = page
            .total
            .unwrap_or_else(|| u32::try_from(page.products.len()).unwrap_or(u32::MAX));
        let skip = page.skip.unwrap_or(offset);
        // The source reports limit 0 once the offset runs past the end.
        let limit = page
            .limit
            .filter(|limit| *limit > 0)
            .unwrap_or(page_size);

        Pagination::Window(derive_window(total, skip, limit))
    }

    pub fn window(&self) -> Option<&PageWindow> {
        match self {
            Pagination::Hidden => None,
            Pagination::Window(window) => Some(window),
        }
    }
}

pub fn derive_window(total: u32, offset: u32, limit: u32) -> PageWindow {
    let limit = limit.max(1);
    let total_pages = total.div_ceil(limit);
    let current_page = (offset / limit).saturating_add(1);

    let mut start = current_page.saturating_sub(MAX_PAGES_SHOWN / 2).max(1);
    let end = total_pages.min(start.saturating_add(MAX_PAGES_SHOWN - 1));
    if end.saturating_add(1) < start.saturating_add(MAX_PAGES_SHOWN) {
        start = end.saturating_sub(MAX_PAGES_SHOWN - 1).max(1);
    }

    let mut entries = Vec::new();
    if start > 1 {
        entries.push(PageEntry::Page {
            number: 1,
            active: current_page == 1,
        });
        if start > 2 {
            entries.push(PageEntry::Ellipsis);
        }
    }
    for number in start..=end {
        entries.push(PageEntry::Page {
            number,
            active: number == current_page,
        });
    }
    if end < total_pages {
        if end + 1 < total_pages {
            entries.push(PageEntry::Ellipsis);
        }
        entries.push(PageEntry::Page {
            number: total_pages,
            active: current_page == total_pages,
        });
    }

    PageWindow {
        total_pages,
        current_page,
        previous: PageLink {
            target: current_page.saturating_sub(1).min(total_pages).max(1),
            enabled: current_page > 1,
        },
        next: PageLink {
            target: current_page.saturating_add(1),
            enabled: current_page < total_pages,
        },
        entries,
    }
}

#[cfg(test)]
#[path = "tests/pagination_tests.rs"]
mod tests;
