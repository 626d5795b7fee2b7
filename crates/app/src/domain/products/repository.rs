//! Products Repository

use serde_json::json;
use storefront::{
    catalog::{CatalogQuery, SortMode},
    pagination::PageRange,
    products::{ColorId, FileId, ProductId, SizeId, StockId},
};

use crate::{
    domain::products::records::{
        CreatedRecord, DETAIL_COLUMNS, NewColorRecord, NewFileRecord, NewProductRecord,
        NewSizeRecord, NewStockRecord, ProductChangesRecord, ProductDetailRecord, ProductRecord,
        SUMMARY_COLUMNS,
    },
    provider::{Access, ProviderClient, ProviderError, Query},
};

const PRODUCTS: &str = "products";
const FILES: &str = "files";
const COLORS: &str = "colors";
const SIZES: &str = "sizes";
const STOCKS: &str = "stocks";

/// Tables holding rows that belong to a product, in the order they must be deleted.
pub(crate) const DEPENDENT_TABLES: [&str; 4] = [STOCKS, SIZES, COLORS, FILES];

#[derive(Debug, Clone)]
pub(crate) struct ProviderProductsRepository {
    client: ProviderClient,
}

impl ProviderProductsRepository {
    #[must_use]
    pub(crate) fn new(client: ProviderClient) -> Self {
        Self { client }
    }

    pub(crate) async fn list_summaries(
        &self,
        filter: CatalogQuery,
        sort: SortMode,
        window: Window,
    ) -> Result<Vec<ProductRecord>, ProviderError> {
        let mut query = Query::new().select(SUMMARY_COLUMNS);

        if let Some(main) = filter.main_category {
            query = query.eq("main_category", main);
        }

        if let Some(sub) = filter.sub_category {
            query = query.eq("sub_category", sub);
        }

        query = query.order(sort.column(), sort.ascending());

        query = match window {
            Window::Range(range) => query.range(range),
            Window::Limit(limit) => query.limit(limit),
        };

        self.client.select(Access::Public, PRODUCTS, &query).await
    }

    pub(crate) async fn list_details(&self) -> Result<Vec<ProductDetailRecord>, ProviderError> {
        let query = Query::new()
            .select(DETAIL_COLUMNS)
            .order(SortMode::Newest.column(), SortMode::Newest.ascending());

        self.client.select(Access::Public, PRODUCTS, &query).await
    }

    pub(crate) async fn get_detail(
        &self,
        product: ProductId,
    ) -> Result<ProductDetailRecord, ProviderError> {
        let query = Query::new().select(DETAIL_COLUMNS).eq("id", product);

        self.client
            .select_single(Access::Public, PRODUCTS, &query)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        product: &NewProductRecord<'_>,
    ) -> Result<i64, ProviderError> {
        let created: Vec<CreatedRecord> = self
            .client
            .insert(Access::User, PRODUCTS, std::slice::from_ref(product))
            .await?;

        created.first().map(|record| record.id).ok_or_else(|| {
            ProviderError::UnexpectedResponse("product insert returned no row".into())
        })
    }

    pub(crate) async fn create_files(
        &self,
        files: &[NewFileRecord<'_>],
    ) -> Result<Vec<CreatedRecord>, ProviderError> {
        self.client.insert(Access::User, FILES, files).await
    }

    pub(crate) async fn create_colors(
        &self,
        colors: &[NewColorRecord<'_>],
    ) -> Result<Vec<CreatedRecord>, ProviderError> {
        self.client.insert(Access::User, COLORS, colors).await
    }

    pub(crate) async fn create_sizes(
        &self,
        sizes: &[NewSizeRecord<'_>],
    ) -> Result<Vec<CreatedRecord>, ProviderError> {
        self.client.insert(Access::User, SIZES, sizes).await
    }

    pub(crate) async fn create_stocks(
        &self,
        stocks: &[NewStockRecord],
    ) -> Result<Vec<CreatedRecord>, ProviderError> {
        self.client.insert(Access::User, STOCKS, stocks).await
    }

    pub(crate) async fn update_product(
        &self,
        product: ProductId,
        changes: &ProductChangesRecord<'_>,
    ) -> Result<(), ProviderError> {
        self.client
            .update(
                Access::User,
                PRODUCTS,
                &Query::new().eq("id", product),
                changes,
            )
            .await
    }

    pub(crate) async fn update_file(&self, file: FileId, url: &str) -> Result<(), ProviderError> {
        self.update_column(FILES, file.get(), "url", url).await
    }

    pub(crate) async fn update_color(
        &self,
        color: ColorId,
        label: &str,
    ) -> Result<(), ProviderError> {
        self.update_column(COLORS, color.get(), "color", label)
            .await
    }

    pub(crate) async fn update_size(&self, size: SizeId, label: &str) -> Result<(), ProviderError> {
        self.update_column(SIZES, size.get(), "size", label).await
    }

    pub(crate) async fn update_stock(
        &self,
        stock: StockId,
        available: u32,
    ) -> Result<(), ProviderError> {
        self.update_column(STOCKS, stock.get(), "stock", available)
            .await
    }

    pub(crate) async fn delete_dependents(
        &self,
        table: &str,
        product: ProductId,
    ) -> Result<(), ProviderError> {
        self.client
            .delete(Access::User, table, &Query::new().eq("product_id", product))
            .await
    }

    pub(crate) async fn delete_product(&self, product: ProductId) -> Result<(), ProviderError> {
        self.client
            .delete(Access::User, PRODUCTS, &Query::new().eq("id", product))
            .await
    }

    async fn update_column<V: serde::Serialize>(
        &self,
        table: &str,
        id: i64,
        column: &str,
        value: V,
    ) -> Result<(), ProviderError> {
        self.client
            .update(
                Access::User,
                table,
                &Query::new().eq("id", id),
                &json!({ column: value }),
            )
            .await
    }
}

/// How many rows a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Window {
    /// A page of a paged listing
    Range(PageRange),

    /// The first `n` rows
    Limit(u64),
}
