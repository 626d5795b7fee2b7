//! Table rendering

use storefront::{
    cart::{Cart, CartTotals},
    products::ProductSummary,
};
use storefront_app::domain::{orders::OrderEntry, products::ProductDetail};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};

fn render(builder: Builder, numeric: std::ops::Range<usize>) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(numeric), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    table.to_string()
}

pub(crate) fn products(products: &[ProductSummary]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["id", "name", "price", "image"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.price.to_string(),
            product.image_url.clone().unwrap_or_default(),
        ]);
    }

    render(builder, 2..3)
}

pub(crate) fn product_detail(detail: &ProductDetail) -> String {
    let mut builder = Builder::default();

    builder.push_record(["color id", "color", "size id", "size", "stock id", "stock"]);

    for ((color, size), stock) in detail.colors.iter().zip(&detail.sizes).zip(&detail.stocks) {
        builder.push_record([
            color.id.to_string(),
            color.label.clone(),
            size.id.to_string(),
            size.label.clone(),
            stock.id.to_string(),
            stock.available.to_string(),
        ]);
    }

    format!(
        "#{} {} ({})\n{} / {}\n{}",
        detail.product.id,
        detail.product.name,
        detail.product.price,
        detail.main_category.as_deref().unwrap_or("-"),
        detail.sub_category.as_deref().unwrap_or("-"),
        render(builder, 5..6),
    )
}

pub(crate) fn product_details(details: &[ProductDetail]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["id", "name", "price", "category", "options", "created"]);

    for detail in details {
        builder.push_record([
            detail.product.id.to_string(),
            detail.product.name.clone(),
            detail.product.price.to_string(),
            format!(
                "{} / {}",
                detail.main_category.as_deref().unwrap_or("-"),
                detail.sub_category.as_deref().unwrap_or("-"),
            ),
            detail.stocks.len().to_string(),
            detail
                .created_at
                .map_or_else(String::new, |created| created.to_string()),
        ]);
    }

    render(builder, 2..3)
}

pub(crate) fn cart(cart: &Cart, totals: &CartTotals) -> String {
    let mut builder = Builder::default();

    builder.push_record(["", "line", "product", "color", "size", "qty", "subtotal"]);

    for (line, subtotal) in cart.lines().iter().zip(&totals.subtotals) {
        builder.push_record([
            if cart.is_selected(line.id) { "x" } else { "" }.to_string(),
            line.id.to_string(),
            line.product.name.clone(),
            line.color.label.clone(),
            line.size.label.clone(),
            subtotal.quantity.to_string(),
            subtotal.amount.to_string(),
        ]);
    }

    builder.push_record([
        String::new(),
        String::new(),
        "total".to_string(),
        String::new(),
        String::new(),
        String::new(),
        totals.total.to_string(),
    ]);

    render(builder, 5..7)
}

pub(crate) fn orders(entries: &[OrderEntry], page: u32, total_pages: u64) -> String {
    let mut builder = Builder::default();

    builder.push_record(["order", "product", "color", "size", "qty", "price", "ordered"]);

    for entry in entries {
        builder.push_record([
            entry.id.to_string(),
            entry.product.name.clone(),
            entry.color.label.clone(),
            entry.size.label.clone(),
            entry.quantity.to_string(),
            entry.product.price.to_string(),
            entry
                .ordered_at
                .map_or_else(String::new, |ordered| ordered.to_string()),
        ]);
    }

    format!("{}\npage {page} of {total_pages}", render(builder, 4..6))
}

#[cfg(test)]
mod tests {
    use storefront::{pricing::won, products::ProductId};

    use super::*;

    #[test]
    fn product_table_lists_every_product() {
        let table = products(&[
            ProductSummary {
                id: ProductId::new(1),
                name: "Oxford".to_string(),
                price: won(39_000),
                image_url: None,
            },
            ProductSummary {
                id: ProductId::new(2),
                name: "Chinos".to_string(),
                price: won(49_000),
                image_url: Some("https://cdn/chinos.png".to_string()),
            },
        ]);

        assert!(table.contains("Oxford"), "missing first product:\n{table}");
        assert!(table.contains("https://cdn/chinos.png"), "missing image:\n{table}");
    }
}
