//! Order Records

use std::num::TryFromIntError;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use storefront::{
    checkout::{OrderDraft, OrderDraftEntry},
    products::{Color, ProductSummary, Size},
};
use uuid::Uuid;

use crate::domain::{
    orders::models::{OrderEntry, OrderId},
    products::records::{ColorRecord, ProductRecord, SizeRecord},
};

pub(crate) const ORDER_COLUMNS: &str =
    "id, quantity, created_at, products (id, name, price), sizes (id, size), colors (id, color)";

pub(crate) const PLACE_ORDER: &str = "place_order";

/// `buy_lists` row with product and variant rows embedded.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OrderRecord {
    pub id: i64,
    pub quantity: i64,
    pub created_at: Option<Timestamp>,
    pub products: ProductRecord,
    pub sizes: SizeRecord,
    pub colors: ColorRecord,
}

impl TryFrom<OrderRecord> for OrderEntry {
    type Error = TryFromIntError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OrderId::new(record.id),
            product: ProductSummary::from(record.products),
            size: Size::from(record.sizes),
            color: Color::from(record.colors),
            quantity: u32::try_from(record.quantity)?,
            ordered_at: record.created_at,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PlaceOrderItemRecord {
    pub product_id: i64,
    pub size_id: i64,
    pub color_id: i64,
    pub stock_id: i64,
    pub quantity: u32,
    pub cart_id: i64,
}

impl From<&OrderDraftEntry> for PlaceOrderItemRecord {
    fn from(entry: &OrderDraftEntry) -> Self {
        Self {
            product_id: entry.product.get(),
            size_id: entry.size.get(),
            color_id: entry.color.get(),
            stock_id: entry.stock.get(),
            quantity: entry.quantity,
            cart_id: entry.cart_line.get(),
        }
    }
}

/// Named arguments of the `place_order` function.
#[derive(Debug, Serialize)]
pub(crate) struct PlaceOrderArgs {
    pub p_idempotency_key: Uuid,
    pub p_items: Vec<PlaceOrderItemRecord>,
}

impl PlaceOrderArgs {
    pub(crate) fn new(draft: &OrderDraft, idempotency_key: Uuid) -> Self {
        Self {
            p_idempotency_key: idempotency_key,
            p_items: draft.entries().iter().map(PlaceOrderItemRecord::from).collect(),
        }
    }
}
