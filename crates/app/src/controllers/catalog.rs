//! Catalog Controllers

use std::sync::Arc;

use storefront::{
    catalog::{CatalogListing, Category, PageRequest, Showcase},
    products::{ProductId, ProductSummary},
};
use tracing::{debug, error};

use crate::{
    domain::products::{ProductDetail, ProductsService, ProductsServiceError},
    notices::Notice,
};

/// Store screen: category filter, accumulated listing and the best strip.
pub struct StoreController {
    products: Arc<dyn ProductsService>,
    listing: CatalogListing<ProductSummary>,
}

impl std::fmt::Debug for StoreController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreController")
            .field("listing", &self.listing)
            .finish_non_exhaustive()
    }
}

impl StoreController {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>) -> Self {
        Self {
            products,
            listing: CatalogListing::new(),
        }
    }

    #[must_use]
    pub fn listing(&self) -> &CatalogListing<ProductSummary> {
        &self.listing
    }

    /// Switch category and load its first page together with its best strip.
    ///
    /// # Errors
    ///
    /// Returns an error notice when either request fails. The listing stays cleared.
    pub async fn select(&mut self, category: Category) -> Result<(), Notice> {
        let request = self.listing.select(category);

        let (page, best) = tokio::join!(
            self.products.catalog_page(request.query, request.range),
            self.products.best_in_category(request.query),
        );

        self.apply_page(&request, page.map_err(into_notice)?);

        if !self.listing.apply_best(request.generation, best.map_err(into_notice)?) {
            debug!(generation = ?request.generation, "discarding stale best strip");
        }

        Ok(())
    }

    /// Append the next page of the current category.
    ///
    /// # Errors
    ///
    /// Returns an error notice when the request fails.
    pub async fn load_more(&mut self) -> Result<(), Notice> {
        let request = self.listing.load_more();

        let page = self
            .products
            .catalog_page(request.query, request.range)
            .await
            .map_err(into_notice)?;

        self.apply_page(&request, page);

        Ok(())
    }

    /// Apply a page fetched for `request`; pages issued before the latest category switch are
    /// dropped.
    pub fn apply_page(&mut self, request: &PageRequest, page: Vec<ProductSummary>) {
        if !self.listing.apply_page(request, page) {
            debug!(generation = ?request.generation, "discarding stale catalog page");
        }
    }
}

/// Main page: best and new strips.
pub struct MainController {
    products: Arc<dyn ProductsService>,
    best: Vec<ProductSummary>,
    new: Vec<ProductSummary>,
}

impl std::fmt::Debug for MainController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainController")
            .field("best", &self.best)
            .field("new", &self.new)
            .finish_non_exhaustive()
    }
}

impl MainController {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>) -> Self {
        Self {
            products,
            best: Vec::new(),
            new: Vec::new(),
        }
    }

    /// # Errors
    ///
    /// Returns an error notice when either strip fails to load.
    pub async fn load(&mut self) -> Result<(), Notice> {
        let (best, new) = tokio::join!(
            self.products.showcase(Showcase::Best),
            self.products.showcase(Showcase::New),
        );

        self.best = best.map_err(into_notice)?;
        self.new = new.map_err(into_notice)?;

        Ok(())
    }

    #[must_use]
    pub fn best(&self) -> &[ProductSummary] {
        &self.best
    }

    #[must_use]
    pub fn new_arrivals(&self) -> &[ProductSummary] {
        &self.new
    }
}

/// Fetch one product with its options for the detail screen.
///
/// # Errors
///
/// Returns an error notice when the product does not exist or the request fails.
pub async fn product_detail(
    products: &dyn ProductsService,
    product: ProductId,
) -> Result<ProductDetail, Notice> {
    products.get_product(product).await.map_err(into_notice)
}

pub(crate) fn into_notice(error: ProductsServiceError) -> Notice {
    match error {
        ProductsServiceError::NotFound => Notice::error("Product not found"),
        ProductsServiceError::Unauthorized => Notice::warning("Please log in first"),
        ProductsServiceError::AlreadyExists => Notice::warning("That product already exists"),
        ProductsServiceError::InvalidData | ProductsServiceError::InvalidStock(_) => {
            Notice::error("The product data is invalid")
        }
        ProductsServiceError::Storage(source) => {
            error!("image storage request failed: {source}");

            Notice::error("Could not store the product image")
        }
        ProductsServiceError::Provider(source) => {
            error!("product request failed: {source}");

            Notice::error("Could not reach the store, please try again")
        }
    }
}
