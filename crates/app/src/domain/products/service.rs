//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use storefront::{
    catalog::{CATEGORY_BEST_LIMIT, CatalogQuery, SHOWCASE_LIMIT, Showcase, SortMode},
    forms::{ProductEditSubmission, ProductSubmission},
    pagination::PageRange,
    products::{ProductId, ProductSummary},
};
use tracing::{debug, info};

use crate::{
    domain::products::{
        errors::ProductsServiceError,
        models::ProductDetail,
        records::{
            NewColorRecord, NewFileRecord, NewProductRecord, NewSizeRecord, NewStockRecord,
            ProductChangesRecord,
        },
        repository::{DEPENDENT_TABLES, ProviderProductsRepository, Window},
    },
    provider::{ImageStore, ProviderClient},
};

#[derive(Clone)]
pub struct ProviderProductsService {
    repository: ProviderProductsRepository,
    images: Arc<dyn ImageStore>,
}

impl std::fmt::Debug for ProviderProductsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderProductsService")
            .field("repository", &self.repository)
            .finish_non_exhaustive()
    }
}

impl ProviderProductsService {
    #[must_use]
    pub fn new(client: ProviderClient, images: Arc<dyn ImageStore>) -> Self {
        Self {
            repository: ProviderProductsRepository::new(client),
            images,
        }
    }

    async fn summaries(
        &self,
        filter: CatalogQuery,
        sort: SortMode,
        window: Window,
    ) -> Result<Vec<ProductSummary>, ProductsServiceError> {
        let records = self
            .repository
            .list_summaries(filter, sort, window)
            .await?;

        Ok(records.into_iter().map(ProductSummary::from).collect())
    }
}

#[async_trait]
impl ProductsService for ProviderProductsService {
    async fn catalog_page(
        &self,
        query: CatalogQuery,
        range: PageRange,
    ) -> Result<Vec<ProductSummary>, ProductsServiceError> {
        self.summaries(query, query.sort, Window::Range(range)).await
    }

    async fn best_in_category(
        &self,
        query: CatalogQuery,
    ) -> Result<Vec<ProductSummary>, ProductsServiceError> {
        self.summaries(
            query,
            SortMode::HighPrice,
            Window::Limit(CATEGORY_BEST_LIMIT),
        )
        .await
    }

    async fn showcase(
        &self,
        showcase: Showcase,
    ) -> Result<Vec<ProductSummary>, ProductsServiceError> {
        let everything = CatalogQuery {
            sort: showcase.sort(),
            main_category: None,
            sub_category: None,
        };

        self.summaries(everything, showcase.sort(), Window::Limit(SHOWCASE_LIMIT))
            .await
    }

    async fn list_products(&self) -> Result<Vec<ProductDetail>, ProductsServiceError> {
        self.repository
            .list_details()
            .await?
            .into_iter()
            .map(|record| ProductDetail::try_from(record).map_err(ProductsServiceError::from))
            .collect()
    }

    async fn get_product(&self, product: ProductId) -> Result<ProductDetail, ProductsServiceError> {
        let record = self.repository.get_detail(product).await?;

        Ok(ProductDetail::try_from(record)?)
    }

    async fn create_product(
        &self,
        product: ProductSubmission,
    ) -> Result<ProductId, ProductsServiceError> {
        let image_path = product.image.storage_path();

        let url = self
            .images
            .upload(
                &image_path,
                &product.image.content_type,
                product.image.bytes.clone(),
            )
            .await
            .map_err(ProductsServiceError::Storage)?;

        let product_id = self
            .repository
            .create_product(&NewProductRecord {
                name: &product.name,
                price: product.price,
                main_category: product.main_category.as_str(),
                sub_category: product.sub_category.as_str(),
            })
            .await?;

        debug!(product_id, "product row created");

        self.repository
            .create_files(&[NewFileRecord {
                product_id,
                url: &url,
            }])
            .await?;

        let colors = self
            .repository
            .create_colors(
                &product
                    .options
                    .iter()
                    .map(|option| NewColorRecord {
                        product_id,
                        color: &option.color,
                    })
                    .collect::<Vec<_>>(),
            )
            .await?;

        let sizes = self
            .repository
            .create_sizes(
                &product
                    .options
                    .iter()
                    .map(|option| NewSizeRecord {
                        product_id,
                        size: &option.size,
                    })
                    .collect::<Vec<_>>(),
            )
            .await?;

        let stocks: Vec<NewStockRecord> = colors
            .iter()
            .zip(&sizes)
            .zip(&product.options)
            .map(|((color, size), option)| NewStockRecord {
                product_id,
                color_id: color.id,
                size_id: size.id,
                stock: option.stock,
            })
            .collect();

        self.repository.create_stocks(&stocks).await?;

        info!(product_id, options = stocks.len(), "product created");

        Ok(ProductId::new(product_id))
    }

    async fn update_product(&self, edit: ProductEditSubmission) -> Result<(), ProductsServiceError> {
        if edit.updates_product() {
            self.repository
                .update_product(
                    edit.product,
                    &ProductChangesRecord {
                        name: edit.name.as_deref(),
                        price: edit.price,
                        main_category: edit.main_category.map(|main| main.as_str()),
                        sub_category: edit.sub_category.map(|sub| sub.as_str()),
                    },
                )
                .await?;
        }

        if let Some((file, image)) = &edit.image {
            let url = self
                .images
                .upload(&image.storage_path(), &image.content_type, image.bytes.clone())
                .await
                .map_err(ProductsServiceError::Storage)?;

            self.repository.update_file(*file, &url).await?;
        }

        for (color, label) in &edit.colors {
            self.repository.update_color(*color, label).await?;
        }

        for (size, label) in &edit.sizes {
            self.repository.update_size(*size, label).await?;
        }

        for (stock, available) in &edit.stocks {
            self.repository.update_stock(*stock, *available).await?;
        }

        info!(product = %edit.product, "product updated");

        Ok(())
    }

    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError> {
        let detail = self.get_product(product).await?;

        let urls: Vec<String> = detail.files.into_iter().map(|file| file.url).collect();

        if !urls.is_empty() {
            self.images
                .remove(urls)
                .await
                .map_err(ProductsServiceError::Storage)?;
        }

        for table in DEPENDENT_TABLES {
            self.repository.delete_dependents(table, product).await?;
        }

        self.repository.delete_product(product).await?;

        info!(%product, "product deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// One page of the catalog for the given category/sort triple.
    async fn catalog_page(
        &self,
        query: CatalogQuery,
        range: PageRange,
    ) -> Result<Vec<ProductSummary>, ProductsServiceError>;

    /// Most expensive products in the category.
    async fn best_in_category(
        &self,
        query: CatalogQuery,
    ) -> Result<Vec<ProductSummary>, ProductsServiceError>;

    /// Main page strip.
    async fn showcase(&self, showcase: Showcase)
    -> Result<Vec<ProductSummary>, ProductsServiceError>;

    /// Every product with options, newest first.
    async fn list_products(&self) -> Result<Vec<ProductDetail>, ProductsServiceError>;

    /// A single product with options.
    async fn get_product(&self, product: ProductId) -> Result<ProductDetail, ProductsServiceError>;

    /// Upload the image and create the product with its options.
    async fn create_product(
        &self,
        product: ProductSubmission,
    ) -> Result<ProductId, ProductsServiceError>;

    /// Apply an edit.
    async fn update_product(&self, edit: ProductEditSubmission) -> Result<(), ProductsServiceError>;

    /// Delete a product, its images and its option rows.
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError>;
}
