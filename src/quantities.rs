//! Quantities
//!
//! Local quantity adjustments keyed by cart line id. Lines without an entry
//! fall back to the quantity the provider returned.

use rustc_hash::FxHashMap;

use crate::cart::CartLineId;

/// Smallest quantity a cart line can hold.
pub const MIN_QUANTITY: u32 = 1;

/// Outcome of a quantity adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The quantity moved to the contained value.
    Changed(u32),

    /// Already at the lower bound; nothing changed.
    AtMinimum,

    /// Already at the available stock; nothing changed.
    AtStockLimit,
}

/// Keyed quantity overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantityMap {
    overrides: FxHashMap<CartLineId, u32>,
}

impl QuantityMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity for `line`, or `fallback` when the line was never adjusted.
    #[must_use]
    pub fn get_or(&self, line: CartLineId, fallback: u32) -> u32 {
        self.overrides.get(&line).copied().unwrap_or(fallback)
    }

    /// Increase the quantity by one, capped at `ceiling` when one is known.
    pub fn increment(
        &mut self,
        line: CartLineId,
        current: u32,
        ceiling: Option<u32>,
    ) -> QuantityChange {
        if ceiling.is_some_and(|ceiling| current >= ceiling) {
            return QuantityChange::AtStockLimit;
        }

        let next = current.saturating_add(1);
        self.overrides.insert(line, next);

        QuantityChange::Changed(next)
    }

    /// Decrease the quantity by one; a no-op at [`MIN_QUANTITY`].
    pub fn decrement(&mut self, line: CartLineId, current: u32) -> QuantityChange {
        if current <= MIN_QUANTITY {
            return QuantityChange::AtMinimum;
        }

        let next = current - 1;
        self.overrides.insert(line, next);

        QuantityChange::Changed(next)
    }

    /// Drop overrides for lines not in `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(CartLineId) -> bool) {
        self.overrides.retain(|line, _| keep(*line));
    }

    /// Drop the override for one line.
    pub fn remove(&mut self, line: CartLineId) {
        self.overrides.remove(&line);
    }

    /// Number of adjusted lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Whether no line was adjusted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unadjusted_line_uses_fallback() {
        let map = QuantityMap::new();

        assert_eq!(map.get_or(CartLineId::new(1), 3), 3);
    }

    #[test]
    fn decrement_at_one_is_a_no_op() {
        let mut map = QuantityMap::new();

        assert_eq!(map.decrement(CartLineId::new(1), 1), QuantityChange::AtMinimum);
        assert!(map.is_empty(), "no override should be recorded");
    }

    #[test]
    fn increment_stops_at_ceiling() {
        let mut map = QuantityMap::new();
        let line = CartLineId::new(1);

        assert_eq!(map.increment(line, 1, Some(2)), QuantityChange::Changed(2));
        assert_eq!(map.increment(line, 2, Some(2)), QuantityChange::AtStockLimit);
        assert_eq!(map.get_or(line, 1), 2);
    }

    #[test]
    fn increment_without_ceiling_is_unbounded() {
        let mut map = QuantityMap::new();

        assert_eq!(
            map.increment(CartLineId::new(1), 99, None),
            QuantityChange::Changed(100)
        );
    }

    #[test]
    fn retain_prunes_missing_lines() {
        let mut map = QuantityMap::new();
        map.increment(CartLineId::new(1), 1, None);
        map.increment(CartLineId::new(2), 1, None);

        map.retain(|line| line == CartLineId::new(2));

        assert_eq!(map.len(), 1);
        assert_eq!(map.get_or(CartLineId::new(1), 1), 1);
        assert_eq!(map.get_or(CartLineId::new(2), 1), 2);
    }
}
