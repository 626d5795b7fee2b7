//! View State Controllers
//!
//! Per-screen state holders. Each controller owns the data it fetched, drives the services,
//! and reports failures as [`Notice`]s.

use storefront::forms::FormError;

use crate::notices::Notice;

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod profile;

pub use admin::AdminController;
pub use auth::{AuthController, AuthMode};
pub use cart::CartController;
pub use catalog::{MainController, StoreController, product_detail};
pub use orders::OrderHistoryController;
pub use profile::ProfileController;

pub(crate) fn form_notice(error: &FormError) -> Notice {
    Notice::warning(error.to_string())
}
