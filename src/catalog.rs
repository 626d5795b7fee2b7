//! Catalog
//!
//! Category/sort selection and the accumulated "load more" listing.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pagination::{CATALOG_PAGE_SIZE, PageCursor, PageRange};

/// Number of products in a category's "best" strip.
pub const CATEGORY_BEST_LIMIT: u64 = 4;

/// Number of products in a main page showcase strip.
pub const SHOWCASE_LIMIT: u64 = 8;

/// Store menu entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Everything, newest first
    #[default]
    All,

    /// Main category `shirts`
    Shirts,

    /// Main category `pants`
    Pants,

    /// Main category `shoes`
    Shoes,

    /// Sub category `basic`
    Basic,

    /// Sub category `new`
    New,

    /// Everything, most expensive first
    HighPrice,

    /// Everything, cheapest first
    LowPrice,
}

impl Category {
    /// Every menu entry, in menu order.
    pub const ALL: [Self; 8] = [
        Self::All,
        Self::Shirts,
        Self::Pants,
        Self::Shoes,
        Self::Basic,
        Self::New,
        Self::HighPrice,
        Self::LowPrice,
    ];

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Shirts => "SHIRTS",
            Self::Pants => "PANTS",
            Self::Shoes => "SHOES",
            Self::Basic => "BASIC",
            Self::New => "NEW",
            Self::HighPrice => "HIGH PRICE",
            Self::LowPrice => "LOW PRICE",
        }
    }

    /// Query parameters the provider receives for this entry.
    #[must_use]
    pub const fn query(self) -> CatalogQuery {
        let (sort, main_category, sub_category) = match self {
            Self::All => (SortMode::Newest, None, None),
            Self::Shirts => (SortMode::Newest, Some("shirts"), None),
            Self::Pants => (SortMode::Newest, Some("pants"), None),
            Self::Shoes => (SortMode::Newest, Some("shoes"), None),
            Self::Basic => (SortMode::Newest, None, Some("basic")),
            Self::New => (SortMode::Newest, None, Some("new")),
            Self::HighPrice => (SortMode::HighPrice, None, None),
            Self::LowPrice => (SortMode::LowPrice, None, None),
        };

        CatalogQuery {
            sort,
            main_category,
            sub_category,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

/// A label that names no menu entry.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase().replace(['_', '-'], " ");

        Self::ALL
            .into_iter()
            .find(|category| category.label() == normalized)
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}

/// Provider sort modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Creation time, newest first (`all`)
    Newest,

    /// Price, descending (`highPrice`)
    HighPrice,

    /// Price, ascending (`lowPrice`)
    LowPrice,
}

impl SortMode {
    /// Wire name of the sort mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "all",
            Self::HighPrice => "highPrice",
            Self::LowPrice => "lowPrice",
        }
    }

    /// Column the provider orders by.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Newest => "created_at",
            Self::HighPrice | Self::LowPrice => "price",
        }
    }

    /// Whether the ordering is ascending.
    #[must_use]
    pub const fn ascending(self) -> bool {
        matches!(self, Self::LowPrice)
    }
}

/// The `(sort, main category, sub category)` triple consumed by the provider query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogQuery {
    /// Ordering
    pub sort: SortMode,

    /// Main category filter
    pub main_category: Option<&'static str>,

    /// Sub category filter
    pub sub_category: Option<&'static str>,
}

/// Main page showcase strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Showcase {
    /// Most expensive products
    Best,

    /// Newest products
    New,
}

impl Showcase {
    /// Sort mode backing the strip.
    #[must_use]
    pub const fn sort(self) -> SortMode {
        match self {
            Self::Best => SortMode::HighPrice,
            Self::New => SortMode::Newest,
        }
    }
}

/// Identifies the category selection a request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// A page request tagged with the selection that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Selection the request belongs to
    pub generation: Generation,

    /// Query triple
    pub query: CatalogQuery,

    /// Rows to fetch
    pub range: PageRange,
}

/// Accumulated catalog listing for the current category.
#[derive(Debug, Clone)]
pub struct CatalogListing<T> {
    category: Category,
    generation: Generation,
    cursor: PageCursor,
    items: Vec<T>,
    best: Vec<T>,
    exhausted: bool,
}

impl<T> Default for CatalogListing<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CatalogListing<T> {
    /// Empty listing on [`Category::All`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            category: Category::All,
            generation: Generation(0),
            cursor: PageCursor::new(CATALOG_PAGE_SIZE),
            items: Vec::new(),
            best: Vec::new(),
            exhausted: false,
        }
    }

    /// Switch category: clear accumulated results, rewind to the first page and invalidate
    /// requests issued for the previous selection.
    pub fn select(&mut self, category: Category) -> PageRequest {
        self.category = category;
        self.generation = Generation(self.generation.0.wrapping_add(1));
        self.cursor.reset();
        self.items.clear();
        self.best.clear();
        self.exhausted = false;

        self.request()
    }

    /// Request for the page after the last one loaded. The cursor only moves once that page
    /// is applied, so a failed fetch is retried with the same window.
    #[must_use]
    pub fn load_more(&self) -> PageRequest {
        PageRequest {
            range: self.cursor.next_range(),
            ..self.request()
        }
    }

    /// Append a fetched page and move the cursor onto it. Returns `false` and ignores the page
    /// when it belongs to an older selection.
    pub fn apply_page(&mut self, request: &PageRequest, page: Vec<T>) -> bool {
        if request.generation != self.generation {
            return false;
        }

        self.cursor.seek(request.range);
        self.exhausted = (page.len() as u64) < request.range.limit;
        self.items.extend(page);

        true
    }

    /// Replace the best strip. Returns `false` and ignores the items when they belong to an
    /// older selection.
    pub fn apply_best(&mut self, generation: Generation, best: Vec<T>) -> bool {
        if generation != self.generation {
            return false;
        }

        self.best = best;

        true
    }

    /// Current category.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Current selection generation.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Accumulated products.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Best strip for the current category.
    #[must_use]
    pub fn best(&self) -> &[T] {
        &self.best
    }

    /// Whether the last page came back short.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Page cursor.
    #[must_use]
    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    fn request(&self) -> PageRequest {
        PageRequest {
            generation: self.generation,
            query: self.category.query(),
            range: self.cursor.range(),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn category_queries_match_the_menu() {
        assert_eq!(
            Category::All.query(),
            CatalogQuery {
                sort: SortMode::Newest,
                main_category: None,
                sub_category: None
            }
        );
        assert_eq!(Category::Shoes.query().main_category, Some("shoes"));
        assert_eq!(Category::Basic.query().sub_category, Some("basic"));
        assert_eq!(Category::HighPrice.query().sort.as_str(), "highPrice");
        assert_eq!(Category::LowPrice.query().sort.as_str(), "lowPrice");
        assert!(Category::LowPrice.query().sort.ascending());
    }

    #[test]
    fn labels_parse_back() -> TestResult {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>()?, category);
        }

        assert_eq!("high_price".parse::<Category>()?, Category::HighPrice);

        Ok(())
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert_eq!(
            "HATS".parse::<Category>(),
            Err(UnknownCategory("HATS".to_string()))
        );
    }

    #[test]
    fn switching_category_clears_results_before_first_page() {
        let mut listing = CatalogListing::new();
        let request = listing.select(Category::Shirts);
        listing.apply_page(&request, vec![1, 2, 3]);
        listing.apply_best(request.generation, vec![9]);

        let request = listing.select(Category::Pants);

        assert!(listing.items().is_empty(), "stale items must be cleared");
        assert!(listing.best().is_empty(), "stale best strip must be cleared");
        assert_eq!(request.range.offset, 0);
        assert_eq!(request.query.main_category, Some("pants"));
    }

    #[test]
    fn late_page_from_previous_category_is_discarded() {
        let mut listing = CatalogListing::new();
        let shirts = listing.select(Category::Shirts);
        let pants = listing.select(Category::Pants);

        assert!(!listing.apply_page(&shirts, vec![1, 2]));
        assert!(listing.apply_page(&pants, vec![3]));
        assert_eq!(listing.items(), &[3]);
    }

    #[test]
    fn load_more_appends_the_next_page() {
        let mut listing = CatalogListing::new();
        let first = listing.select(Category::All);
        listing.apply_page(&first, (0..8).collect());

        let second = listing.load_more();
        listing.apply_page(&second, vec![8, 9]);

        assert_eq!(second.range, PageRange { offset: 8, limit: 8 });
        assert_eq!(listing.items().len(), 10);
        assert!(listing.is_exhausted(), "short page marks the end");
    }

    #[test]
    fn unanswered_load_more_repeats_the_same_window() {
        let mut listing = CatalogListing::new();
        let first = listing.select(Category::All);
        listing.apply_page(&first, (0..8).collect());

        let failed = listing.load_more();
        let retry = listing.load_more();

        assert_eq!(failed.range, retry.range, "retry must ask for the same rows");
        assert_eq!(retry.range.offset, 8);

        listing.apply_page(&retry, (8..16).collect());

        assert_eq!(listing.load_more().range.offset, 16);
    }
}
