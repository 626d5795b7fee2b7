//! Product Records

use std::num::TryFromIntError;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use storefront::{
    pricing::won,
    products::{Color, ProductFile, ProductId, ProductSummary, Size, Stock},
};

use crate::domain::products::models::ProductDetail;

pub(crate) const SUMMARY_COLUMNS: &str = "id, name, price, files (id, url)";

pub(crate) const DETAIL_COLUMNS: &str = "id, name, price, main_category, sub_category, \
     files (id, url), colors (id, color), sizes (id, size), stocks (id, stock), created_at";

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FileRecord {
    pub id: i64,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ColorRecord {
    pub id: i64,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SizeRecord {
    pub id: i64,
    pub size: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StockRecord {
    pub id: i64,
    pub stock: i64,
}

/// Product row with its images, as listed in the catalog.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProductRecord {
    pub id: i64,
    pub name: String,
    pub price: i64,

    #[serde(default)]
    pub files: Vec<FileRecord>,
}

/// Product row with every related row embedded.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProductDetailRecord {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub main_category: Option<String>,
    pub sub_category: Option<String>,

    #[serde(default)]
    pub files: Vec<FileRecord>,

    #[serde(default)]
    pub colors: Vec<ColorRecord>,

    #[serde(default)]
    pub sizes: Vec<SizeRecord>,

    #[serde(default)]
    pub stocks: Vec<StockRecord>,

    pub created_at: Option<Timestamp>,
}

/// Row id returned from an insert.
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct CreatedRecord {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewProductRecord<'a> {
    pub name: &'a str,
    pub price: i64,
    pub main_category: &'a str,
    pub sub_category: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewFileRecord<'a> {
    pub product_id: i64,
    pub url: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewColorRecord<'a> {
    pub product_id: i64,
    pub color: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewSizeRecord<'a> {
    pub product_id: i64,
    pub size: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewStockRecord {
    pub product_id: i64,
    pub color_id: i64,
    pub size_id: i64,
    pub stock: u32,
}

/// Column changes for a product row; unset columns are left alone.
#[derive(Debug, Default, Serialize)]
pub(crate) struct ProductChangesRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_category: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<&'a str>,
}

impl From<FileRecord> for ProductFile {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id.into(),
            url: record.url,
        }
    }
}

impl From<ColorRecord> for Color {
    fn from(record: ColorRecord) -> Self {
        Self {
            id: record.id.into(),
            label: record.color,
        }
    }
}

impl From<SizeRecord> for Size {
    fn from(record: SizeRecord) -> Self {
        Self {
            id: record.id.into(),
            label: record.size,
        }
    }
}

impl TryFrom<StockRecord> for Stock {
    type Error = TryFromIntError;

    fn try_from(record: StockRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id.into(),
            available: u32::try_from(record.stock)?,
        })
    }
}

impl From<ProductRecord> for ProductSummary {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: ProductId::new(record.id),
            name: record.name,
            price: won(record.price),
            image_url: record.files.into_iter().next().map(|file| file.url),
        }
    }
}

impl TryFrom<ProductDetailRecord> for ProductDetail {
    type Error = TryFromIntError;

    fn try_from(record: ProductDetailRecord) -> Result<Self, Self::Error> {
        let files: Vec<ProductFile> = record.files.into_iter().map(ProductFile::from).collect();

        Ok(Self {
            product: ProductSummary {
                id: ProductId::new(record.id),
                name: record.name,
                price: won(record.price),
                image_url: files.first().map(|file| file.url.clone()),
            },
            main_category: record.main_category,
            sub_category: record.sub_category,
            files,
            colors: record.colors.into_iter().map(Color::from).collect(),
            sizes: record.sizes.into_iter().map(Size::from).collect(),
            stocks: record
                .stocks
                .into_iter()
                .map(Stock::try_from)
                .collect::<Result<_, _>>()?,
            created_at: record.created_at,
        })
    }
}
