//! Pagination

use std::num::NonZeroU32;

use thiserror::Error;

/// Page size for the order history.
pub const ORDER_HISTORY_PAGE_SIZE: NonZeroU32 = NonZeroU32::MIN;

/// Page size for catalog browsing.
pub const CATALOG_PAGE_SIZE: NonZeroU32 = match NonZeroU32::new(8) {
    Some(size) => size,
    None => NonZeroU32::MIN,
};

/// Errors raised while moving a cursor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    /// Page numbers start at one.
    #[error("page numbers start at 1")]
    ZeroPage,

    /// The requested page is past the last page.
    #[error("page {requested} is past the last page ({last})")]
    PastLastPage {
        /// Requested one-based page number
        requested: u32,

        /// Last available one-based page number
        last: u64,
    },
}

/// Offset/limit pair handed to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    /// Rows to skip
    pub offset: u64,

    /// Rows to return
    pub limit: u64,
}

/// Page cursor with a fixed page size.
///
/// `page` is zero-based internally; the user-facing numbers accepted by
/// [`PageCursor::change_page`] are one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: u32,
    page_size: NonZeroU32,
    total_count: Option<u64>,
}

impl PageCursor {
    /// Cursor on the first page.
    #[must_use]
    pub const fn new(page_size: NonZeroU32) -> Self {
        Self {
            page: 0,
            page_size,
            total_count: None,
        }
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// One-based page number, as shown to users.
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page.saturating_add(1)
    }

    /// Rows per page.
    #[must_use]
    pub const fn page_size(&self) -> NonZeroU32 {
        self.page_size
    }

    /// Rows before the current page.
    #[must_use]
    pub fn skip(&self) -> u64 {
        self.window(self.page).offset
    }

    /// Offset/limit pair for the current page.
    #[must_use]
    pub fn range(&self) -> PageRange {
        self.window(self.page)
    }

    /// Window of the page after the current one. The cursor does not move until the page is
    /// committed with [`PageCursor::seek`].
    #[must_use]
    pub fn next_range(&self) -> PageRange {
        self.window(self.page.saturating_add(1))
    }

    /// Move to the page a fetched window starts at.
    pub fn seek(&mut self, range: PageRange) {
        let page = range.offset / u64::from(self.page_size.get());

        self.page = u32::try_from(page).unwrap_or(u32::MAX);
    }

    /// Record the total number of rows across all pages.
    pub fn set_total_count(&mut self, total_count: u64) {
        self.total_count = Some(total_count);
    }

    /// Total rows, if counted.
    #[must_use]
    pub const fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// `ceil(total_count / page_size)`, or zero before a count is known.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_count
            .map_or(0, |total| total.div_ceil(u64::from(self.page_size.get())))
    }

    /// Window of the one-based page `page_number`, without moving the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPage`] for page zero and
    /// [`PaginationError::PastLastPage`] when a count is known and the page is past the end.
    pub fn range_of(&self, page_number: u32) -> Result<PageRange, PaginationError> {
        if page_number == 0 {
            return Err(PaginationError::ZeroPage);
        }

        let last = self.total_pages();

        if self.total_count.is_some() && u64::from(page_number) > last.max(1) {
            return Err(PaginationError::PastLastPage {
                requested: page_number,
                last,
            });
        }

        Ok(self.window(page_number - 1))
    }

    /// Move to the one-based page `page_number`.
    ///
    /// # Errors
    ///
    /// Same as [`PageCursor::range_of`]; a rejected page leaves the cursor where it was.
    pub fn change_page(&mut self, page_number: u32) -> Result<PageRange, PaginationError> {
        let range = self.range_of(page_number)?;

        self.page = page_number - 1;

        Ok(range)
    }

    /// Pull the cursor back onto the last page after the total shrank; the first page when
    /// nothing is left.
    pub fn clamp_to_total(&mut self) {
        let last = self.total_pages().saturating_sub(1);

        if u64::from(self.page) > last {
            self.page = u32::try_from(last).unwrap_or(u32::MAX);
        }
    }

    /// Back to the first page, forgetting the total count.
    pub fn reset(&mut self) {
        self.page = 0;
        self.total_count = None;
    }

    fn window(&self, page: u32) -> PageRange {
        let size = u64::from(self.page_size.get());

        PageRange {
            offset: u64::from(page) * size,
            limit: size,
        }
    }
}
