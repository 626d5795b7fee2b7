//! Checkout

use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cart::{Cart, CartLineId},
    products::{ColorId, ProductId, SizeId, StockId},
};

/// Errors raised while building an order draft.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// No cart line was marked for checkout.
    #[error("no cart lines selected")]
    NothingSelected,
}

/// One order entry built from a selected cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderDraftEntry {
    /// Ordered product
    pub product: ProductId,

    /// Ordered size
    pub size: SizeId,

    /// Ordered color
    pub color: ColorId,

    /// Stock row the order draws from
    pub stock: StockId,

    /// Ordered quantity
    pub quantity: u32,

    /// Cart line the entry replaces
    pub cart_line: CartLineId,
}

/// The set of cart lines selected for conversion into an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    entries: SmallVec<[OrderDraftEntry; 4]>,
}

impl OrderDraft {
    /// Build a draft from exactly the marked lines of `cart`, using their effective quantities.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NothingSelected`] when no line is marked.
    pub fn from_selection(cart: &Cart) -> Result<Self, CheckoutError> {
        let entries: SmallVec<[OrderDraftEntry; 4]> = cart
            .selected_lines()
            .map(|line| OrderDraftEntry {
                product: line.product.id,
                size: line.size.id,
                color: line.color.id,
                stock: line.stock.id,
                quantity: cart.quantity(line.id).unwrap_or(line.quantity),
                cart_line: line.id,
            })
            .collect();

        if entries.is_empty() {
            return Err(CheckoutError::NothingSelected);
        }

        Ok(Self { entries })
    }

    /// Draft entries, in cart line order.
    #[must_use]
    pub fn entries(&self) -> &[OrderDraftEntry] {
        &self.entries
    }

    /// Source cart lines the draft consumes.
    #[must_use]
    pub fn cart_lines(&self) -> Vec<CartLineId> {
        self.entries.iter().map(|entry| entry.cart_line).collect()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a built draft; kept for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
