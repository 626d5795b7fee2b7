use clap::Args;
use storefront_app::context::AppContext;

use crate::{commands::sign_in, config::Credentials, errors::CliError, output};

#[derive(Debug, Args)]
pub(crate) struct OrdersArgs {
    #[command(flatten)]
    credentials: Credentials,

    /// One-based page number
    #[arg(long, default_value_t = 1)]
    page: u32,
}

pub(crate) async fn run(context: &AppContext, args: OrdersArgs) -> Result<(), CliError> {
    sign_in(context, &args.credentials).await?;

    let mut controller = context.order_history_controller();

    controller.load().await?;

    if args.page != 1 {
        controller.change_page(args.page).await?;
    }

    let cursor = controller.cursor();

    println!(
        "{}",
        output::orders(controller.entries(), cursor.page_number(), cursor.total_pages())
    );

    Ok(())
}
