//! Carts

pub mod errors;
pub mod models;
mod records;
mod repository;
pub mod service;

pub use errors::CartsServiceError;
pub use models::NewCartLine;
pub use service::*;
