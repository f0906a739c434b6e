//! Offset pagination primitives shared by the user admin console.
//!
//! The upstream users API pages with `limit`/`skip` query parameters. This
//! crate owns the arithmetic around that contract:
//!
//! - [`PageNumber`] is a validated, 1-based page index.
//! - [`PageRequest`] turns a page number and page size into `limit`/`skip`.
//! - [`PageWindow`] describes what the UI may navigate to. The number of
//!   navigable pages is `min(cap, total_pages)`, so pages past the cap exist
//!   upstream but cannot be reached from the page controls.
//! - [`PageWindow::resolve_input`] implements the page-number text entry:
//!   anything unparsable or outside the navigable range reverts to the current
//!   page instead of failing.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of records requested per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Maximum number of navigable pages exposed by the page controls.
pub const DEFAULT_PAGE_CAP: u32 = 10;

/// Validation failures for pagination inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageError {
    /// Page numbers are 1-based.
    #[error("page numbers start at 1")]
    ZeroPage,
    /// A page must hold at least one record.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Validated 1-based page number.
///
/// # Examples
/// ```
/// use pagination::PageNumber;
///
/// let page = PageNumber::new(3).expect("valid page");
/// assert_eq!(page.get(), 3);
/// assert!(PageNumber::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageNumber(u32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Validate and wrap a page number.
    ///
    /// # Errors
    /// Returns [`PageError::ZeroPage`] for `0`.
    pub const fn new(page: u32) -> Result<Self, PageError> {
        if page == 0 {
            return Err(PageError::ZeroPage);
        }
        Ok(Self(page))
    }

    /// Raw 1-based value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
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

impl TryFrom<u32> for PageNumber {
    type Error = PageError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageNumber> for u32 {
    fn from(value: PageNumber) -> Self {
        value.0
    }
}

/// One page worth of `limit`/`skip` parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: PageNumber,
    page_size: u32,
}

impl PageRequest {
    /// Build a request for `page` with `page_size` records per page.
    ///
    /// # Errors
    /// Returns [`PageError::ZeroPageSize`] when `page_size` is `0`.
    pub const fn new(page: PageNumber, page_size: u32) -> Result<Self, PageError> {
        if page_size == 0 {
            return Err(PageError::ZeroPageSize);
        }
        Ok(Self { page, page_size })
    }

    /// Requested page.
    #[must_use]
    pub const fn page(&self) -> PageNumber {
        self.page
    }

    /// Number of records to request.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.page_size
    }

    /// Number of records to skip: `(page - 1) * page_size`.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageNumber, PageRequest};
    ///
    /// let request = PageRequest::new(PageNumber::new(4).expect("page"), 10).expect("size");
    /// assert_eq!(request.skip(), 30);
    /// ```
    #[must_use]
    pub const fn skip(&self) -> u64 {
        (self.page.get() as u64 - 1) * self.page_size as u64
    }
}

/// Number of pages needed for `total` records, never less than one.
///
/// A page size of zero is treated as one record per page.
#[must_use]
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    let pages = total.div_ceil(u64::from(page_size.max(1))).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Outcome of the page-number text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageInput {
    /// The input named a navigable page.
    Jump(PageNumber),
    /// The input was rejected; the control shows this page again.
    Revert(PageNumber),
}

impl PageInput {
    /// Page the control should display after handling the input.
    #[must_use]
    pub const fn page(self) -> PageNumber {
        match self {
            Self::Jump(page) | Self::Revert(page) => page,
        }
    }
}

/// Navigable range of pages around the current one.
///
/// # Examples
/// ```
/// use pagination::{PageNumber, PageWindow};
///
/// let window = PageWindow::new(PageNumber::FIRST, 21, 10);
/// assert_eq!(window.navigable_pages(), 10);
/// assert_eq!(window.hidden_pages(), 11);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    current: PageNumber,
    total_pages: u32,
    cap: u32,
}

impl PageWindow {
    /// Describe the window for `current` out of `total_pages`, capped at `cap`.
    ///
    /// `total_pages` and `cap` are raised to at least one.
    #[must_use]
    pub fn new(current: PageNumber, total_pages: u32, cap: u32) -> Self {
        Self {
            current,
            total_pages: total_pages.max(1),
            cap: cap.max(1),
        }
    }

    /// Page currently displayed.
    #[must_use]
    pub const fn current(&self) -> PageNumber {
        self.current
    }

    /// Pages that exist upstream.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Pages reachable from the controls: `min(cap, total_pages)`.
    #[must_use]
    pub fn navigable_pages(&self) -> u32 {
        self.cap.min(self.total_pages)
    }

    /// Pages that exist upstream but sit beyond the cap.
    #[must_use]
    pub fn hidden_pages(&self) -> u32 {
        self.total_pages - self.navigable_pages()
    }

    /// Whether `page` lies in `[1, navigable_pages]`.
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        (1..=self.navigable_pages()).contains(&page)
    }

    /// Last navigable page.
    #[must_use]
    pub fn last(&self) -> PageNumber {
        PageNumber(self.navigable_pages())
    }

    /// Whether the first/previous controls are disabled.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.current.get() <= 1
    }

    /// Whether the next/last controls are disabled.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current.get() >= self.navigable_pages()
    }

    /// Page behind the "previous" control.
    #[must_use]
    pub fn previous(&self) -> Option<PageNumber> {
        if self.is_first() {
            None
        } else {
            Some(PageNumber(self.current.get() - 1))
        }
    }

    /// Page behind the "next" control.
    #[must_use]
    pub fn next(&self) -> Option<PageNumber> {
        if self.is_last() {
            None
        } else {
            Some(PageNumber(self.current.get() + 1))
        }
    }

    /// Interpret text typed into the page-number entry.
    ///
    /// Surrounding whitespace is ignored. Non-numeric input and numbers
    /// outside the navigable range revert to the current page.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageInput, PageNumber, PageWindow};
    ///
    /// let window = PageWindow::new(PageNumber::new(2).expect("page"), 3, 10);
    /// assert_eq!(window.resolve_input("999"), PageInput::Revert(window.current()));
    /// assert_eq!(window.resolve_input(" 3 "), PageInput::Jump(PageNumber::new(3).expect("page")));
    /// ```
    #[must_use]
    pub fn resolve_input(&self, input: &str) -> PageInput {
        match input.trim().parse::<u32>() {
            Ok(page) if self.contains(page) => PageInput::Jump(PageNumber(page)),
            _ => PageInput::Revert(self.current),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for page arithmetic and window clamping.

    use super::*;
    use rstest::rstest;

    fn page(value: u32) -> PageNumber {
        PageNumber::new(value).expect("valid page")
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 10)]
    #[case(7, 60)]
    #[case(10, 90)]
    fn skip_is_offset_of_previous_pages(#[case] number: u32, #[case] expected: u64) {
        let request = PageRequest::new(page(number), DEFAULT_PAGE_SIZE).expect("request");
        assert_eq!(request.skip(), expected);
        assert_eq!(request.limit(), DEFAULT_PAGE_SIZE);
    }

    #[rstest]
    #[case(0, 10, 1)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(208, 10, 21)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] size: u32, #[case] expected: u32) {
        assert_eq!(total_pages(total, size), expected);
    }

    #[test]
    fn zero_page_and_zero_size_are_rejected() {
        assert_eq!(PageNumber::new(0), Err(PageError::ZeroPage));
        assert_eq!(
            PageRequest::new(PageNumber::FIRST, 0),
            Err(PageError::ZeroPageSize)
        );
    }

    #[rstest]
    #[case(3, 3)]
    #[case(21, 10)]
    #[case(10, 10)]
    fn navigable_pages_are_capped(#[case] total: u32, #[case] expected: u32) {
        let window = PageWindow::new(PageNumber::FIRST, total, DEFAULT_PAGE_CAP);
        assert_eq!(window.navigable_pages(), expected);
        assert!(!window.contains(expected + 1));
    }

    #[test]
    fn controls_stop_at_window_edges() {
        let first = PageWindow::new(PageNumber::FIRST, 5, 10);
        assert!(first.is_first());
        assert_eq!(first.previous(), None);
        assert_eq!(first.next(), Some(page(2)));

        let last = PageWindow::new(page(10), 21, 10);
        assert!(last.is_last());
        assert_eq!(last.next(), None);
        assert_eq!(last.last(), page(10));
    }

    #[rstest]
    #[case("999")]
    #[case("0")]
    #[case("-1")]
    #[case("abc")]
    #[case("")]
    fn rejected_input_reverts_to_current(#[case] input: &str) {
        let window = PageWindow::new(page(2), 3, DEFAULT_PAGE_CAP);
        assert_eq!(window.resolve_input(input), PageInput::Revert(page(2)));
        assert_eq!(window.resolve_input(input).page(), page(2));
    }

    #[test]
    fn input_beyond_cap_reverts_even_when_page_exists_upstream() {
        let window = PageWindow::new(PageNumber::FIRST, 21, DEFAULT_PAGE_CAP);
        assert_eq!(window.resolve_input("11"), PageInput::Revert(PageNumber::FIRST));
        assert_eq!(window.resolve_input("10"), PageInput::Jump(page(10)));
    }
}
