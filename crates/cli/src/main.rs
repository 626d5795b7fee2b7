//! Storefront CLI

use std::process;

use tracing::{error, info};

use storefront_app::context::AppContext;

use crate::config::Cli;

mod commands;
mod config;
mod errors;
mod observability;
mod output;

#[tokio::main]
async fn main() {
    // Load configuration from .env and CLI arguments
    let cli = Cli::load().unwrap_or_else(|e| e.exit());

    if let Err(e) = observability::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln"
        )]
        {
            eprintln!("Logging error: {e}");
        }

        process::exit(1);
    }

    let context = match AppContext::new(cli.provider.into()) {
        Ok(context) => context,
        Err(e) => {
            error!("Failed to initialise storefront client: {e}");
            process::exit(1);
        }
    };

    info!("Storefront client ready");

    if let Err(e) = cli.command.run(&context).await {
        error!("{e}");
        process::exit(1);
    }
}
