use clap::{Args, Subcommand};
use storefront::{
    cart::CartLineId,
    products::{ColorId, ProductId, SizeId, StockId},
};
use storefront_app::{context::AppContext, domain::carts::NewCartLine};

use crate::{
    commands::sign_in,
    config::Credentials,
    errors::{CliError, report},
    output,
};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(flatten)]
    credentials: Credentials,

    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// List cart lines with subtotals and the total
    Show,

    /// Add a product variant
    Add(AddArgs),

    /// Remove a line
    Remove {
        /// Cart line id
        line: CartLineId,
    },

    /// Order the given lines
    Checkout(CheckoutArgs),
}

#[derive(Debug, Args)]
struct AddArgs {
    #[arg(long)]
    product: ProductId,

    #[arg(long)]
    size: SizeId,

    #[arg(long)]
    color: ColorId,

    #[arg(long)]
    stock: StockId,

    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    /// Lines to order; repeat for several
    #[arg(long = "line")]
    lines: Vec<CartLineId>,

    /// Order every line
    #[arg(long, conflicts_with = "lines")]
    all: bool,

    /// Raise a line's quantity by one before ordering; repeat to raise further
    #[arg(long = "increment")]
    increments: Vec<CartLineId>,
}

pub(crate) async fn run(context: &AppContext, command: CartCommand) -> Result<(), CliError> {
    sign_in(context, &command.credentials).await?;

    let mut controller = context.cart_controller();

    match command.command {
        CartSubcommand::Show => {
            controller.load().await?;
        }
        CartSubcommand::Add(args) => {
            let line = controller
                .add_line(NewCartLine {
                    product: args.product,
                    size: args.size,
                    color: args.color,
                    stock: args.stock,
                    quantity: args.quantity,
                })
                .await?;

            println!("added cart line {line}");
        }
        CartSubcommand::Remove { line } => {
            controller.load().await?;
            controller.delete_line(line).await?;
        }
        CartSubcommand::Checkout(args) => {
            controller.load().await?;

            for line in args.increments {
                controller.increment(line)?;
            }

            if args.all {
                controller.select_all(true);
            } else {
                for line in args.lines {
                    controller.toggle(line, true)?;
                }
            }

            report(controller.place_order().await)?;
        }
    }

    let totals = controller.totals()?;

    println!("{}", output::cart(controller.cart(), &totals));

    Ok(())
}
