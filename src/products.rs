//! Products

use rusty_money::{Money, iso::Currency};

use crate::ids::TypedId;

/// Product Id
pub type ProductId = TypedId<ProductSummary>;

/// Size Id
pub type SizeId = TypedId<Size>;

/// Color Id
pub type ColorId = TypedId<Color>;

/// Stock Id
pub type StockId = TypedId<Stock>;

/// Product File Id
pub type FileId = TypedId<ProductFile>;

/// The slice of a product that cart lines, listings and orders carry around.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Unit price
    pub price: Money<'static, Currency>,

    /// First image of the product, if any
    pub image_url: Option<String>,
}

/// Size variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Size {
    /// Size id
    pub id: SizeId,

    /// Size label, e.g. `"M"` or `"270"`
    pub label: String,
}

/// Color variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color {
    /// Color id
    pub id: ColorId,

    /// Color label
    pub label: String,
}

/// Stock row pairing a color with a size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stock {
    /// Stock id
    pub id: StockId,

    /// Units available
    pub available: u32,
}

/// Product image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFile {
    /// File id
    pub id: FileId,

    /// Public URL
    pub url: String,
}
