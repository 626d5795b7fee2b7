use clap::Args;
use storefront::{catalog::Category, products::ProductId};
use storefront_app::{context::AppContext, controllers::product_detail};

use crate::{errors::CliError, output};

#[derive(Debug, Args)]
pub(crate) struct CatalogArgs {
    /// Menu entry: ALL, SHIRTS, PANTS, SHOES, BASIC, NEW, HIGH-PRICE or LOW-PRICE
    #[arg(long, default_value = "ALL")]
    category: Category,

    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

#[derive(Debug, Args)]
pub(crate) struct ProductArgs {
    /// Product id
    id: ProductId,
}

pub(crate) async fn showcase(context: &AppContext) -> Result<(), CliError> {
    let mut controller = context.main_controller();

    controller.load().await?;

    println!("Best\n{}", output::products(controller.best()));
    println!("New\n{}", output::products(controller.new_arrivals()));

    Ok(())
}

pub(crate) async fn browse(context: &AppContext, args: CatalogArgs) -> Result<(), CliError> {
    let mut controller = context.store_controller();

    controller.select(args.category).await?;

    for _ in 1..args.pages {
        if controller.listing().is_exhausted() {
            break;
        }

        controller.load_more().await?;
    }

    let listing = controller.listing();

    println!("{} best\n{}", listing.category(), output::products(listing.best()));
    println!("{}\n{}", listing.category(), output::products(listing.items()));

    Ok(())
}

pub(crate) async fn product(context: &AppContext, args: ProductArgs) -> Result<(), CliError> {
    let detail = product_detail(context.products.as_ref(), args.id).await?;

    println!("{}", output::product_detail(&detail));

    Ok(())
}
