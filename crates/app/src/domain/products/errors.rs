//! Products service errors.

use std::num::TryFromIntError;

use thiserror::Error;

use crate::provider::{ProviderError, ProviderErrorKind};

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error("not signed in")]
    Unauthorized,

    #[error("invalid data")]
    InvalidData,

    #[error("invalid stock value")]
    InvalidStock(#[from] TryFromIntError),

    #[error("image storage error")]
    Storage(#[source] ProviderError),

    #[error("provider error")]
    Provider(#[source] ProviderError),
}

impl From<ProviderError> for ProductsServiceError {
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

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn conflict_maps_to_already_exists() {
        let error = ProductsServiceError::from(ProviderError::Status {
            status: StatusCode::CONFLICT,
            message: "duplicate key value".to_string(),
        });

        assert!(
            matches!(error, ProductsServiceError::AlreadyExists),
            "expected AlreadyExists, got {error:?}"
        );
    }

    #[test]
    fn negative_stock_is_rejected() {
        let result = u32::try_from(-1_i64).map_err(ProductsServiceError::from);

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidStock(_))),
            "expected InvalidStock, got {result:?}"
        );
    }
}
