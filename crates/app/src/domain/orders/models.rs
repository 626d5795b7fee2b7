//! Order Models

use jiff::Timestamp;
use storefront::{
    ids::TypedId,
    products::{Color, ProductSummary, Size},
};

pub type OrderId = TypedId<OrderEntry>;

/// One row of the signed-in user's order history.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderEntry {
    pub id: OrderId,
    pub product: ProductSummary,
    pub size: Size,
    pub color: Color,
    pub quantity: u32,
    pub ordered_at: Option<Timestamp>,
}

/// Order rows created from a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub orders: Vec<OrderId>,
}
