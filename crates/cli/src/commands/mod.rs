//! Subcommands

use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::de::DeserializeOwned;
use storefront_app::context::AppContext;

use crate::{
    config::Credentials,
    errors::{CliError, report},
};

mod account;
mod admin;
mod cart;
mod catalog;
mod orders;

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Main page strips: best and new products
    Showcase,

    /// Browse a category
    Catalog(catalog::CatalogArgs),

    /// Show one product with its options
    Product(catalog::ProductArgs),

    /// Cart of the signed-in user
    Cart(cart::CartCommand),

    /// Order history of the signed-in user
    Orders(orders::OrdersArgs),

    /// Profile of the signed-in user
    Profile(account::ProfileCommand),

    /// Register a new account from a YAML file
    SignUp(account::SignUpArgs),

    /// Product management
    Admin(admin::AdminCommand),
}

impl Commands {
    pub(crate) async fn run(self, context: &AppContext) -> Result<(), CliError> {
        match self {
            Self::Showcase => catalog::showcase(context).await,
            Self::Catalog(args) => catalog::browse(context, args).await,
            Self::Product(args) => catalog::product(context, args).await,
            Self::Cart(command) => cart::run(context, command).await,
            Self::Orders(args) => orders::run(context, args).await,
            Self::Profile(command) => account::profile(context, command).await,
            Self::SignUp(args) => account::sign_up(context, args).await,
            Self::Admin(command) => admin::run(context, command).await,
        }
    }
}

/// Sign in through the log-in screen.
async fn sign_in(context: &AppContext, credentials: &Credentials) -> Result<(), CliError> {
    let mut controller = context.auth_controller();

    let form = controller.log_in_form_mut();
    form.email.clone_from(&credentials.email);
    form.password.clone_from(&credentials.password);

    report(controller.submit().await)
}

async fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    serde_norway::from_str(&text).map_err(|source| CliError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

async fn read_bytes(path: &Path) -> Result<Vec<u8>, CliError> {
    tokio::fs::read(path).await.map_err(|source| CliError::Read {
        path: PathBuf::from(path),
        source,
    })
}
