//! Orders service errors.

use std::num::TryFromIntError;

use thiserror::Error;

use crate::provider::{ProviderError, ProviderErrorKind};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("not signed in")]
    Unauthorized,

    #[error("order was already placed")]
    AlreadyPlaced,

    #[error("invalid data")]
    InvalidData,

    #[error("invalid quantity")]
    InvalidQuantity(#[from] TryFromIntError),

    #[error("provider error")]
    Provider(#[source] ProviderError),
}

impl From<ProviderError> for OrdersServiceError {
    fn from(error: ProviderError) -> Self {
        match error.kind() {
            ProviderErrorKind::Unauthorized => Self::Unauthorized,
            ProviderErrorKind::NotFound => Self::NotFound,
            ProviderErrorKind::AlreadyExists => Self::AlreadyPlaced,
            ProviderErrorKind::InvalidData => Self::InvalidData,
            ProviderErrorKind::Other => Self::Provider(error),
        }
    }
}
