//! Pagination: page windows over ordered sources and page envelopes.

use crate::LookupExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::iter::{Skip, Take};

/// Page size used when neither the request nor the caller supplies one.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// A command or query that carries paging fields.
///
/// Resolution writes the normalized values back, so after paging the
/// request's values are authoritative.
pub trait Pageable {
    /// Requested page number, 1-based.
    fn page_number(&self) -> Option<i64>;
    /// Requested page size.
    fn page_size(&self) -> Option<usize>;
    fn set_page_number(&mut self, page_number: Option<i64>);
    fn set_page_size(&mut self, page_size: Option<usize>);
}

/// A request for a page of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-indexed).
    #[serde(default)]
    pub page_number: Option<i64>,
    /// The number of items per page.
    #[serde(default)]
    pub page_size: Option<usize>,
}

impl PageRequest {
    /// Creates a new page request.
    #[must_use]
    pub const fn new(page_number: Option<i64>, page_size: Option<usize>) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// Reads `page` and `size` from query-string parameters.
    ///
    /// Missing or unparsable values are left absent for normalization.
    #[must_use]
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let page = params.get_or_default("page");
        let size = params.get_or_default("size");
        Self {
            page_number: page.trim().parse().ok(),
            page_size: size.trim().parse().ok(),
        }
    }
}

impl Pageable for PageRequest {
    fn page_number(&self) -> Option<i64> {
        self.page_number
    }

    fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    fn set_page_number(&mut self, page_number: Option<i64>) {
        self.page_number = page_number;
    }

    fn set_page_size(&mut self, page_size: Option<usize>) {
        self.page_size = page_size;
    }
}

/// Caller-side page size defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    /// Size used when the request has none; [`DEFAULT_PAGE_SIZE`] if unset.
    #[serde(default)]
    pub default_page_size: Option<usize>,
    /// Upper bound for the page size.
    #[serde(default)]
    pub max_page_size: Option<usize>,
}

impl PageLimits {
    #[must_use]
    pub const fn new(default_page_size: Option<usize>, max_page_size: Option<usize>) -> Self {
        Self {
            default_page_size,
            max_page_size,
        }
    }
}

/// The skip/take pair for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: usize,
    pub take: usize,
}

/// Normalizes `request` in place and returns its page window.
///
/// Page numbers below 1 become 1; a missing size takes the default; a size
/// above the cap is clamped to it.
pub fn resolve_page<P: Pageable + ?Sized>(request: &mut P, limits: PageLimits) -> PageWindow {
    if request.page_number().map_or(true, |number| number < 1) {
        request.set_page_number(Some(1));
    }

    if request.page_size().is_none() {
        request.set_page_size(Some(limits.default_page_size.unwrap_or(DEFAULT_PAGE_SIZE)));
    }

    if let Some(max) = limits.max_page_size {
        if request.page_size().map_or(true, |size| size > max) {
            request.set_page_size(Some(max));
        }
    }

    let page_number = request.page_number().unwrap_or(1);
    let take = request.page_size().unwrap_or(DEFAULT_PAGE_SIZE);
    let skip = if page_number > 1 {
        usize::try_from(page_number - 1)
            .unwrap_or(usize::MAX)
            .saturating_mul(take)
    } else {
        0
    };

    PageWindow { skip, take }
}

/// Returns the requested page of `items`, normalizing `request` in place.
pub fn page<'a, T, P: Pageable + ?Sized>(items: &'a [T], request: &mut P, limits: PageLimits) -> &'a [T] {
    let window = resolve_page(request, limits);
    let start = window.skip.min(items.len());
    let end = start.saturating_add(window.take).min(items.len());
    &items[start..end]
}

/// Pages `items` and wraps the page with the total count of `items`.
#[must_use]
pub fn to_paged_list<T: Clone, P: Pageable + ?Sized>(
    items: &[T],
    request: &mut P,
    limits: PageLimits,
) -> PagedList<T> {
    let total_items = items.len();
    let slice = page(items, request, limits);
    PagedList::new(slice.to_vec(), request.page_number().unwrap_or(1), total_items)
}

/// Extension trait paging any iterator with skip/take.
pub trait Paged: Iterator + Sized {
    /// Skips to the requested page and takes at most one page of items.
    fn paged<P: Pageable + ?Sized>(self, request: &mut P, limits: PageLimits) -> Take<Skip<Self>> {
        let window = resolve_page(request, limits);
        self.skip(window.skip).take(window.take)
    }
}

impl<I: Iterator> Paged for I {}

/// Collects any item sequence into a page envelope.
pub trait ToPagedList: IntoIterator + Sized {
    /// Wraps the items with the resolved page number and the full total.
    fn to_paged_list(self, page_number: i64, total_items: usize) -> PagedList<Self::Item> {
        PagedList::new(self, page_number, total_items)
    }
}

impl<I: IntoIterator> ToPagedList for I {}

/// A page of results with the total across all pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedList<T> {
    page_number: i64,
    items: Vec<T>,
    total_items: usize,
}

impl<T> PagedList<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = T>, page_number: i64, total_items: usize) -> Self {
        Self {
            page_number,
            items: items.into_iter().collect(),
            total_items,
        }
    }

    #[must_use]
    pub const fn page_number(&self) -> i64 {
        self.page_number
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns the total number of items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total number of pages for the given page size.
    #[must_use]
    pub const fn total_pages(&self, page_size: usize) -> usize {
        if page_size == 0 {
            0
        } else {
            self.total_items.div_ceil(page_size)
        }
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    /// Returns true if a later page exists for the given page size.
    #[must_use]
    pub fn has_next(&self, page_size: usize) -> bool {
        usize::try_from(self.page_number).map_or(false, |number| number < self.total_pages(page_size))
    }

    /// Maps the page content to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PagedList<U> {
        PagedList {
            page_number: self.page_number,
            items: self.items.into_iter().map(f).collect(),
            total_items: self.total_items,
        }
    }

    /// Consumes the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> IntoIterator for PagedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
