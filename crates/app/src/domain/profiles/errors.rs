//! Profiles service errors.

use thiserror::Error;

use crate::provider::{ProviderError, ProviderErrorKind};

#[derive(Debug, Error)]
pub enum ProfilesServiceError {
    #[error("profile not found")]
    NotFound,

    #[error("not signed in")]
    Unauthorized,

    #[error("invalid data")]
    InvalidData,

    #[error("provider error")]
    Provider(#[source] ProviderError),
}

impl From<ProviderError> for ProfilesServiceError {
    fn from(error: ProviderError) -> Self {
        match error.kind() {
            ProviderErrorKind::Unauthorized => Self::Unauthorized,
            ProviderErrorKind::NotFound => Self::NotFound,
            ProviderErrorKind::InvalidData | ProviderErrorKind::AlreadyExists => {
                Self::InvalidData
            }
            ProviderErrorKind::Other => Self::Provider(error),
        }
    }
}
