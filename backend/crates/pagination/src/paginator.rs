//! One-based page arithmetic over fully materialised collections.

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::PaginationError;

/// Number of items shown on a single page.
///
/// # Examples
/// ```
/// use pagination::PageSize;
///
/// assert_eq!(PageSize::DEFAULT.get(), 10);
/// assert!(PageSize::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Page size used by the marketplace listing table.
    pub const DEFAULT: Self = Self(NonZeroUsize::MIN.saturating_add(9));

    /// Validate and construct a page size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageSize`] when `size` is zero.
    pub const fn new(size: usize) -> Result<Self, PaginationError> {
        match NonZeroUsize::new(size) {
            Some(value) => Ok(Self(value)),
            None => Err(PaginationError::ZeroPageSize),
        }
    }

    /// Return the size as a plain integer.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for PageSize {
    type Error = PaginationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.get()
    }
}

/// One-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageNumber(NonZeroUsize);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroUsize::MIN);

    /// Validate and construct a page number.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageNumber`] when `page` is zero.
    pub const fn new(page: usize) -> Result<Self, PaginationError> {
        match NonZeroUsize::new(page) {
            Some(value) => Ok(Self(value)),
            None => Err(PaginationError::ZeroPageNumber),
        }
    }

    /// Construct a page number, mapping zero to the first page.
    #[must_use]
    pub const fn saturating(page: usize) -> Self {
        match NonZeroUsize::new(page) {
            Some(value) => Self(value),
            None => Self::FIRST,
        }
    }

    /// Return the page number as a plain integer.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for PageNumber {
    type Error = PaginationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageNumber> for usize {
    fn from(value: PageNumber) -> Self {
        value.get()
    }
}

/// Page arithmetic for a collection of `total_items` items.
///
/// An empty collection still spans one (empty) page so callers always have a
/// valid page to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    total_items: usize,
    page_size: PageSize,
}

impl Paginator {
    /// Create a paginator for `total_items` items split into `page_size` pages.
    #[must_use]
    pub const fn new(total_items: usize, page_size: PageSize) -> Self {
        Self {
            total_items,
            page_size,
        }
    }

    /// Number of items being paginated.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Configured page size.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Number of pages, never less than one.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        let pages = self.total_items.div_ceil(self.page_size.get());
        if pages == 0 { 1 } else { pages }
    }

    /// The last valid page.
    #[must_use]
    pub const fn last_page(&self) -> PageNumber {
        PageNumber::saturating(self.total_pages())
    }

    /// Clamp an arbitrary page request into `[1, total_pages]`.
    #[must_use]
    pub const fn clamp(&self, page: usize) -> PageNumber {
        let last = self.total_pages();
        if page > last {
            PageNumber::saturating(last)
        } else {
            PageNumber::saturating(page)
        }
    }

    /// Item index range covered by `page` after clamping.
    #[must_use]
    pub fn bounds(&self, page: PageNumber) -> Range<usize> {
        let page = self.clamp(page.get()).get();
        let size = self.page_size.get();
        let start = page
            .saturating_sub(1)
            .saturating_mul(size)
            .min(self.total_items);
        let end = start.saturating_add(size).min(self.total_items);
        start..end
    }

    /// Borrow the items belonging to `page` after clamping.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T], page: PageNumber) -> &'a [T] {
        let Range { start, end } = self.bounds(page);
        let end = end.min(items.len());
        items.get(start.min(end)..end).unwrap_or_default()
    }

    /// Page before `page`, saturating at the first page.
    #[must_use]
    pub const fn previous(&self, page: PageNumber) -> PageNumber {
        self.clamp(page.get().saturating_sub(1))
    }

    /// Page after `page`, saturating at the last page.
    #[must_use]
    pub const fn next(&self, page: PageNumber) -> PageNumber {
        self.clamp(page.get().saturating_add(1))
    }

    /// Whether a page exists before `page`.
    #[must_use]
    pub const fn has_previous(&self, page: PageNumber) -> bool {
        self.clamp(page.get()).get() > 1
    }

    /// Whether a page exists after `page`.
    #[must_use]
    pub const fn has_next(&self, page: PageNumber) -> bool {
        self.clamp(page.get()).get() < self.total_pages()
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for page arithmetic.
    #![expect(
        clippy::expect_used,
        reason = "test code uses expect for clear failure messages"
    )]

    use super::*;
    use rstest::rstest;

    fn paginator(total_items: usize) -> Paginator {
        Paginator::new(total_items, PageSize::DEFAULT)
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(9, 1)]
    #[case(10, 1)]
    #[case(11, 2)]
    #[case(25, 3)]
    #[case(100, 10)]
    #[case(101, 11)]
    fn total_pages_rounds_up_with_floor_of_one(#[case] items: usize, #[case] expected: usize) {
        assert_eq!(paginator(items).total_pages(), expected);
    }

    #[test]
    fn every_valid_page_has_expected_length() {
        for items in 0..=55_usize {
            let paginator = paginator(items);
            let collection: Vec<usize> = (0..items).collect();
            for page in 1..=paginator.total_pages() {
                let number = PageNumber::new(page).expect("page is non-zero");
                let slice = paginator.slice(&collection, number);
                let consumed = page.saturating_sub(1).saturating_mul(10);
                let expected = items.saturating_sub(consumed).min(10);
                assert_eq!(slice.len(), expected, "items={items} page={page}");
                assert_eq!(slice.is_empty(), items == 0, "items={items} page={page}");
            }
        }
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(3, 3)]
    #[case(4, 3)]
    #[case(usize::MAX, 3)]
    fn clamp_keeps_requests_in_range(#[case] requested: usize, #[case] expected: usize) {
        assert_eq!(paginator(25).clamp(requested).get(), expected);
    }

    #[test]
    fn navigation_saturates_at_both_ends() {
        let paginator = paginator(25);
        let last = paginator.last_page();

        assert_eq!(paginator.previous(PageNumber::FIRST), PageNumber::FIRST);
        assert_eq!(paginator.next(last), last);
        assert_eq!(paginator.next(PageNumber::FIRST).get(), 2);
        assert_eq!(paginator.previous(last).get(), 2);
        assert!(!paginator.has_previous(PageNumber::FIRST));
        assert!(!paginator.has_next(last));
    }

    #[test]
    fn empty_collection_has_single_empty_page() {
        let paginator = paginator(0);
        let empty: [u8; 0] = [];

        assert_eq!(paginator.total_pages(), 1);
        assert!(paginator.slice(&empty, PageNumber::FIRST).is_empty());
        assert!(!paginator.has_next(PageNumber::FIRST));
    }

    #[test]
    fn slice_tolerates_shorter_collections() {
        let paginator = paginator(25);
        let short = [1, 2, 3];
        let page = PageNumber::new(2).expect("page is non-zero");

        assert!(paginator.slice(&short, page).is_empty());
    }

    #[test]
    fn page_numbers_reject_zero() {
        assert_eq!(PageNumber::new(0), Err(PaginationError::ZeroPageNumber));
        assert_eq!(PageNumber::saturating(0), PageNumber::FIRST);
    }

    #[test]
    fn page_size_deserialises_from_integers() {
        let size: PageSize = serde_json::from_str("25").expect("valid page size");
        assert_eq!(size.get(), 25);
        assert!(serde_json::from_str::<PageSize>("0").is_err());
    }
}
