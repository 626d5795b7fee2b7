//! Cart Records

use std::num::TryFromIntError;

use serde::{Deserialize, Serialize};
use storefront::{
    cart::{CartLine, CartLineId},
    products::{Color, ProductSummary, Size, Stock},
};

use crate::{
    auth::UserUuid,
    domain::products::records::{ColorRecord, ProductRecord, SizeRecord, StockRecord},
};

pub(crate) const CART_COLUMNS: &str = "id, count, \
     products (id, name, price, files (id, url)), \
     sizes (id, size), colors (id, color), stocks (id, stock)";

/// Cart row with the product, size, color and stock rows embedded.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CartLineRecord {
    pub id: i64,
    pub count: i64,
    pub products: ProductRecord,
    pub sizes: SizeRecord,
    pub colors: ColorRecord,
    pub stocks: StockRecord,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewCartLineRecord {
    pub user_id: UserUuid,
    pub product_id: i64,
    pub size_id: i64,
    pub color_id: i64,
    pub stock_id: i64,
    pub count: u32,
}

impl TryFrom<CartLineRecord> for CartLine {
    type Error = TryFromIntError;

    fn try_from(record: CartLineRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CartLineId::new(record.id),
            product: ProductSummary::from(record.products),
            size: Size::from(record.sizes),
            color: Color::from(record.colors),
            stock: Stock::try_from(record.stocks)?,
            quantity: u32::try_from(record.count)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use storefront::pricing::won;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn embedded_rows_become_a_cart_line() -> TestResult {
        let record: CartLineRecord = serde_json::from_value(json!({
            "id": 5,
            "count": 2,
            "products": { "id": 1, "name": "Tee", "price": 19000, "files": [] },
            "sizes": { "id": 2, "size": "M" },
            "colors": { "id": 3, "color": "white" },
            "stocks": { "id": 4, "stock": 6 }
        }))?;

        let line = CartLine::try_from(record)?;

        assert_eq!(line.id, CartLineId::new(5));
        assert_eq!(line.quantity, 2);
        assert_eq!(line.product.price, won(19_000));
        assert_eq!(line.stock_ceiling(), Some(6));
        assert_eq!(line.product.image_url, None);

        Ok(())
    }

    #[test]
    fn negative_count_is_rejected() -> TestResult {
        let record: CartLineRecord = serde_json::from_value(json!({
            "id": 5,
            "count": -1,
            "products": { "id": 1, "name": "Tee", "price": 19000 },
            "sizes": { "id": 2, "size": "M" },
            "colors": { "id": 3, "color": "white" },
            "stocks": { "id": 4, "stock": 6 }
        }))?;

        assert!(CartLine::try_from(record).is_err(), "negative count must fail");

        Ok(())
    }
}
