//! Sessions and the in-process session store.

use std::{fmt, sync::Arc};

use jiff::{SignedDuration, Timestamp};
use serde::Deserialize;
use tokio::sync::RwLock;
use zeroize::Zeroize;

use crate::{auth::User, provider::ProviderError};

/// Seconds before expiry at which a session is refreshed.
pub const REFRESH_LEEWAY_SECONDS: i64 = 60;

/// A bearer or refresh token. Zeroed on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretToken(String);

impl SecretToken {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self(token)
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretToken(**redacted**)")
    }
}

impl Drop for SecretToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// A signed-in user's tokens.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: SecretToken,
    pub refresh_token: SecretToken,

    /// When the access token should be refreshed.
    pub refresh_at: Timestamp,

    pub user: User,
}

impl Session {
    #[must_use]
    pub fn needs_refresh(&self, now: Timestamp) -> bool {
        now >= self.refresh_at
    }
}

/// Token grant response from the session provider.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: User,
}

impl TokenResponse {
    pub(crate) fn into_session(self, now: Timestamp) -> Result<Session, ProviderError> {
        let lifetime = SignedDuration::from_secs(
            self.expires_in
                .saturating_sub(REFRESH_LEEWAY_SECONDS)
                .max(0),
        );

        let refresh_at = now
            .checked_add(lifetime)
            .map_err(|error| ProviderError::UnexpectedResponse(error.to_string()))?;

        Ok(Session {
            access_token: SecretToken::new(self.access_token),
            refresh_token: SecretToken::new(self.refresh_token),
            refresh_at,
            user: self.user,
        })
    }
}

/// Shared slot holding the current session, if any.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub async fn get(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|session| session.user.clone())
    }

    pub async fn set(&self, session: Session) {
        *self.inner.write().await = Some(session);
    }

    /// Forget the session, returning it.
    pub async fn clear(&self) -> Option<Session> {
        self.inner.write().await.take()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.inner.read().await.is_some()
    }
}
