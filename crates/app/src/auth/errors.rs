//! Auth service errors.

use thiserror::Error;

use crate::provider::{ProviderError, ProviderErrorKind};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email already registered")]
    AlreadyRegistered,

    #[error("not signed in")]
    Unauthorized,

    #[error("session provider error")]
    Provider(#[source] ProviderError),
}

impl From<ProviderError> for AuthServiceError {
    fn from(error: ProviderError) -> Self {
        match error.kind() {
            ProviderErrorKind::Unauthorized => Self::Unauthorized,
            ProviderErrorKind::AlreadyExists => Self::AlreadyRegistered,
            ProviderErrorKind::NotFound
            | ProviderErrorKind::InvalidData
            | ProviderErrorKind::Other => Self::Provider(error),
        }
    }
}
