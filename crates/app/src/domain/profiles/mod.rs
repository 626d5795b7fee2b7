//! Profiles

pub mod errors;
pub mod models;
mod records;
mod repository;
pub mod service;

pub use errors::ProfilesServiceError;
pub use models::Profile;
pub use service::*;
