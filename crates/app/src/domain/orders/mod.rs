//! Orders

pub mod errors;
pub mod models;
mod records;
mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use models::*;
pub use service::*;
