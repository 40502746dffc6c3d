//! Page-number pagination over ordered collections.
//!
//! Every listing view slices its result set with the same rules: the page
//! number comes from a `page` query parameter, and anything unusable
//! (missing, non-numeric, zero, past the end) degrades to the first page.

use serde::Serialize;

/// Parse a raw `page` query parameter.
///
/// Missing, non-numeric, and zero values all yield page 1. Range clamping
/// happens later in [`Paginator::resolve`] once the total is known.
#[must_use]
pub fn parse_page_param(raw: Option<&str>) -> u64 {
    match raw.map(str::parse::<u64>) {
        Some(Ok(n)) if n >= 1 => n,
        _ => 1,
    }
}

/// A resolved slice of an ordered collection: which page, and the
/// offset/limit to fetch it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    /// The effective page number (1-based, after degradation).
    pub number: u64,
    /// Row offset of the first item on the page.
    pub offset: u64,
    /// Maximum number of items on the page.
    pub limit: u64,
}

/// One page of items, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Items on this page, in collection order.
    pub items: Vec<T>,
    /// This page's number (1-based).
    pub number: u64,
    /// Total items across all pages.
    pub total_items: u64,
    /// Total page count (at least 1).
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Assemble a page from fetched items and a resolved slice.
    #[must_use]
    pub const fn new(items: Vec<T>, slice: Slice, total_items: u64, total_pages: u64) -> Self {
        Self {
            items,
            number: slice.number,
            total_items,
            total_pages,
        }
    }

    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Map the items of this page, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Fixed-size paginator configured with the items-per-page value.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    page_size: u64,
}

impl Paginator {
    /// Create a paginator. A zero page size is treated as 1.
    #[must_use]
    pub const fn new(page_size: u64) -> Self {
        Self {
            page_size: if page_size == 0 { 1 } else { page_size },
        }
    }

    /// The configured items-per-page value.
    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Total page count for `total_items`: `ceil(total / size)`, minimum 1.
    ///
    /// An empty collection still has one (empty) page.
    #[must_use]
    pub const fn total_pages(&self, total_items: u64) -> u64 {
        if total_items == 0 {
            1
        } else {
            total_items.div_ceil(self.page_size)
        }
    }

    /// Resolve a requested page number against the collection size.
    ///
    /// Out-of-range requests (0 or past the last page) degrade to the
    /// first page rather than failing.
    #[must_use]
    pub const fn resolve(&self, total_items: u64, requested: u64) -> Slice {
        let total_pages = self.total_pages(total_items);
        let number = if requested >= 1 && requested <= total_pages {
            requested
        } else {
            1
        };

        Slice {
            number,
            offset: (number - 1) * self.page_size,
            limit: self.page_size,
        }
    }
}
