//! Cart

use rusty_money::{Money, iso::Currency};
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::{
    ids::TypedId,
    pricing::{PricingError, line_subtotal, sum},
    products::{Color, ProductSummary, Size, Stock},
    quantities::{QuantityChange, QuantityMap},
};

/// Cart Line Id
pub type CartLineId = TypedId<CartLine>;

/// Errors raised by cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The line is not loaded in this cart.
    #[error("cart line {0} is not loaded")]
    UnknownLine(CartLineId),
}

/// One product/variant/quantity entry in a user's cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Line id
    pub id: CartLineId,

    /// Product on this line
    pub product: ProductSummary,

    /// Chosen size
    pub size: Size,

    /// Chosen color
    pub color: Color,

    /// Stock row for the chosen color and size
    pub stock: Stock,

    /// Quantity as stored by the provider
    pub quantity: u32,
}

impl CartLine {
    /// Upper bound for the quantity, when the provider reports stock.
    #[must_use]
    pub fn stock_ceiling(&self) -> Option<u32> {
        (self.stock.available > 0).then_some(self.stock.available)
    }
}

/// Subtotal of a single cart line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSubtotal {
    /// Line the subtotal belongs to
    pub line: CartLineId,

    /// Quantity the subtotal was computed from
    pub quantity: u32,

    /// Quantity multiplied by unit price
    pub amount: Money<'static, Currency>,
}

/// Derived cart totals.
#[derive(Debug, Clone, PartialEq)]
pub struct CartTotals {
    /// Per-line subtotals, in line order
    pub subtotals: Vec<LineSubtotal>,

    /// Sum of all subtotals
    pub total: Money<'static, Currency>,
}

/// Loaded cart lines together with local quantity and selection state.
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    quantities: QuantityMap,
    selected: FxHashSet<CartLineId>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart priced in `currency`.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            quantities: QuantityMap::new(),
            selected: FxHashSet::default(),
            currency,
        }
    }

    /// Replace the loaded lines with a fresh fetch.
    ///
    /// Quantity adjustments and selections survive for lines that are still present and are
    /// dropped for lines that are gone, whatever order the provider returns lines in.
    pub fn replace_lines(&mut self, lines: Vec<CartLine>) {
        let present: FxHashSet<CartLineId> = lines.iter().map(|line| line.id).collect();

        self.quantities.retain(|line| present.contains(&line));
        self.selected.retain(|line| present.contains(line));
        self.lines = lines;
    }

    /// Remove lines locally, e.g. after they were deleted or ordered.
    pub fn remove_lines(&mut self, ids: &[CartLineId]) {
        self.lines.retain(|line| !ids.contains(&line.id));

        for id in ids {
            self.quantities.remove(*id);
            self.selected.remove(id);
        }
    }

    /// Loaded lines, in provider order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a loaded line.
    #[must_use]
    pub fn line(&self, id: CartLineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Number of loaded lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no lines are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency totals are computed in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Effective quantity of a loaded line.
    #[must_use]
    pub fn quantity(&self, id: CartLineId) -> Option<u32> {
        self.line(id)
            .map(|line| self.quantities.get_or(line.id, line.quantity))
    }

    /// Increase a line's quantity by one, capped at its available stock.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownLine`] if the line is not loaded.
    pub fn increment(&mut self, id: CartLineId) -> Result<QuantityChange, CartError> {
        let line = self.line(id).ok_or(CartError::UnknownLine(id))?;
        let current = self.quantities.get_or(id, line.quantity);
        let ceiling = line.stock_ceiling();

        Ok(self.quantities.increment(id, current, ceiling))
    }

    /// Decrease a line's quantity by one, never below one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownLine`] if the line is not loaded.
    pub fn decrement(&mut self, id: CartLineId) -> Result<QuantityChange, CartError> {
        let line = self.line(id).ok_or(CartError::UnknownLine(id))?;
        let current = self.quantities.get_or(id, line.quantity);

        Ok(self.quantities.decrement(id, current))
    }

    /// Mark or unmark a line for checkout.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownLine`] if the line is not loaded.
    pub fn set_selected(&mut self, id: CartLineId, selected: bool) -> Result<(), CartError> {
        if self.line(id).is_none() {
            return Err(CartError::UnknownLine(id));
        }

        if selected {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }

        Ok(())
    }

    /// Mark or unmark every loaded line.
    pub fn select_all(&mut self, selected: bool) {
        if selected {
            self.selected.extend(self.lines.iter().map(|line| line.id));
        } else {
            self.selected.clear();
        }
    }

    /// Whether a line is marked for checkout.
    #[must_use]
    pub fn is_selected(&self, id: CartLineId) -> bool {
        self.selected.contains(&id)
    }

    /// Marked lines, in line order.
    pub fn selected_lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines
            .iter()
            .filter(|line| self.selected.contains(&line.id))
    }

    /// Number of marked lines.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Clear every selection mark.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Recompute per-line subtotals and the grand total from scratch.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] on overflow or currency mismatch.
    pub fn totals(&self) -> Result<CartTotals, PricingError> {
        let subtotals = self
            .lines
            .iter()
            .map(|line| {
                let quantity = self.quantities.get_or(line.id, line.quantity);

                Ok(LineSubtotal {
                    line: line.id,
                    quantity,
                    amount: line_subtotal(&line.product.price, quantity)?,
                })
            })
            .collect::<Result<Vec<_>, PricingError>>()?;

        let total = sum(subtotals.iter().map(|subtotal| &subtotal.amount), self.currency)?;

        Ok(CartTotals { subtotals, total })
    }
}
