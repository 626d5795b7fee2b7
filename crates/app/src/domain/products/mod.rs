//! Products

pub mod errors;
pub mod models;
pub(crate) mod records;
mod repository;
pub mod service;

pub use errors::ProductsServiceError;
pub use models::ProductDetail;
pub use service::*;
