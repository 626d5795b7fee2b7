//! Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Currency the storefront prices in.
pub const STORE_CURRENCY: &Currency = rusty_money::iso::KRW;

/// Errors that can occur while calculating prices.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Multiplying a unit price by a quantity overflowed.
    #[error("line subtotal overflowed for quantity {0}")]
    Overflow(u32),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Build a price in the store currency from whole won.
#[must_use]
pub fn won(amount: i64) -> Money<'static, Currency> {
    Money::from_minor(amount, STORE_CURRENCY)
}

/// Price of `quantity` units at `unit_price`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] when the product does not fit in the minor unit range.
pub fn line_subtotal(
    unit_price: &Money<'static, Currency>,
    quantity: u32,
) -> Result<Money<'static, Currency>, PricingError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow(quantity))?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Sum a sequence of amounts, starting from zero in `currency`.
///
/// # Errors
///
/// Returns [`PricingError::Money`] on a currency mismatch.
pub fn sum<'a, I>(
    amounts: I,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError>
where
    I: IntoIterator<Item = &'a Money<'static, Currency>>,
{
    amounts
        .into_iter()
        .try_fold(Money::from_minor(0, currency), |acc, amount| acc.add(*amount))
        .map_err(PricingError::from)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn line_subtotal_multiplies_unit_price() -> TestResult {
        assert_eq!(line_subtotal(&won(12_000), 3)?, won(36_000));

        Ok(())
    }

    #[test]
    fn line_subtotal_detects_overflow() {
        let result = line_subtotal(&won(i64::MAX), 2);

        assert_eq!(result, Err(PricingError::Overflow(2)));
    }

    #[test]
    fn sum_of_nothing_is_zero() -> TestResult {
        let amounts: [Money<'static, Currency>; 0] = [];

        assert_eq!(sum(&amounts, STORE_CURRENCY)?, won(0));

        Ok(())
    }

    #[test]
    fn sum_rejects_mixed_currencies() {
        let amounts = [won(100), Money::from_minor(100, iso::USD)];

        assert!(matches!(
            sum(&amounts, STORE_CURRENCY),
            Err(PricingError::Money(_))
        ));
    }
}
