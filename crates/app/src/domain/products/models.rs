//! Product Models

use jiff::Timestamp;
use storefront::{
    forms::{EditOptionRow, OptionRow, ProductEditForm},
    products::{Color, ProductFile, ProductSummary, Size, Stock},
};

/// A product with its images and options.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub product: ProductSummary,
    pub main_category: Option<String>,
    pub sub_category: Option<String>,
    pub files: Vec<ProductFile>,
    pub colors: Vec<Color>,
    pub sizes: Vec<Size>,
    pub stocks: Vec<Stock>,
    pub created_at: Option<Timestamp>,
}

impl ProductDetail {
    /// Edit form prefilled with the current values. Color `i`, size `i` and stock `i` form row `i`.
    #[must_use]
    pub fn edit_form(&self) -> ProductEditForm {
        let options = self
            .colors
            .iter()
            .zip(&self.sizes)
            .zip(&self.stocks)
            .map(|((color, size), stock)| EditOptionRow {
                color_id: color.id,
                size_id: size.id,
                stock_id: stock.id,
                values: OptionRow {
                    color: color.label.clone(),
                    size: size.label.clone(),
                    stock: stock.available.to_string(),
                },
            })
            .collect();

        ProductEditForm {
            product: self.product.id,
            file: self.files.first().map(|file| file.id),
            name: self.product.name.clone(),
            price: self.product.price.to_minor_units().to_string(),
            main_category: self
                .main_category
                .as_deref()
                .and_then(|value| value.parse().ok()),
            sub_category: self
                .sub_category
                .as_deref()
                .and_then(|value| value.parse().ok()),
            image: None,
            options,
        }
    }
}
