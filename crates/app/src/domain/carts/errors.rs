//! Carts service errors.

use std::num::TryFromIntError;

use thiserror::Error;

use crate::provider::{ProviderError, ProviderErrorKind};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart line not found")]
    NotFound,

    #[error("not signed in")]
    Unauthorized,

    #[error("cart line already exists")]
    AlreadyExists,

    #[error("invalid data")]
    InvalidData,

    #[error("invalid quantity or stock value")]
    InvalidCount(#[from] TryFromIntError),

    #[error("provider error")]
    Provider(#[source] ProviderError),
}

impl From<ProviderError> for CartsServiceError {
    fn from(error: ProviderError) -> Self {
        match error.kind() {
            ProviderErrorKind::Unauthorized => Self::Unauthorized,
            ProviderErrorKind::NotFound => Self::NotFound,
            ProviderErrorKind::AlreadyExists => Self::AlreadyExists,
            ProviderErrorKind::InvalidData => Self::InvalidData,
            ProviderErrorKind::Other => Self::Provider(error),
        }
    }
}
