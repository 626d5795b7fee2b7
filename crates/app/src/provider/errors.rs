//! Provider errors.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the remote data provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An HTTP transport or body decoding error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("provider returned {status}: {message}")]
    Status {
        /// Response status
        status: StatusCode,

        /// Provider supplied message, or the raw body
        message: String,
    },

    /// The configured base URL cannot be used.
    #[error("invalid provider url {url}: {reason}")]
    InvalidUrl {
        /// Configured value
        url: String,

        /// Parser message
        reason: String,
    },

    /// The call needs a signed-in user and there is no session.
    #[error("no active session")]
    Unauthenticated,

    /// The provider returned a body the client could not make sense of.
    #[error("unexpected response from provider: {0}")]
    UnexpectedResponse(String),
}

/// Coarse classification of a provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// 401/403 or no session
    Unauthorized,

    /// 404, or a single-row request that matched nothing (406)
    NotFound,

    /// 409
    AlreadyExists,

    /// 400/422
    InvalidData,

    /// Anything else
    Other,
}

impl ProviderError {
    /// Classify the failure.
    #[must_use]
    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            Self::Unauthenticated => ProviderErrorKind::Unauthorized,
            Self::Status { status, .. } => match *status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderErrorKind::Unauthorized,
                StatusCode::NOT_FOUND | StatusCode::NOT_ACCEPTABLE => ProviderErrorKind::NotFound,
                StatusCode::CONFLICT => ProviderErrorKind::AlreadyExists,
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    ProviderErrorKind::InvalidData
                }
                _ => ProviderErrorKind::Other,
            },
            Self::Http(_) | Self::InvalidUrl { .. } | Self::UnexpectedResponse(_) => {
                ProviderErrorKind::Other
            }
        }
    }

    pub(crate) fn from_body(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| body.trim().to_string());

        Self::Status { status, message }
    }
}

/// Error payloads across the REST, auth and storage endpoints.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message
            .or(self.msg)
            .or(self.error_description)
            .or(self.error)
    }
}
