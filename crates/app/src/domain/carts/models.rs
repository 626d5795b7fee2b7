//! Cart Models

use storefront::products::{ColorId, ProductId, SizeId, StockId};

/// A product variant to put in the signed-in user's cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartLine {
    pub product: ProductId,
    pub size: SizeId,
    pub color: ColorId,
    pub stock: StockId,
    pub quantity: u32,
}
