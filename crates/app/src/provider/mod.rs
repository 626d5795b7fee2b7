//! Remote data provider client.
//!
//! One [`ProviderClient`] is built by the entry point and shared by every service. It owns the
//! HTTP connection pool and the session store, so requests made on behalf of the signed-in user
//! carry their access token.

use std::{sync::Arc, time::Duration};

use jiff::Timestamp;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use tracing::{debug, warn};

use crate::auth::{SecretToken, SessionStore, User, gotrue};

mod errors;
mod query;
mod rest;
pub mod storage;

pub use errors::{ProviderError, ProviderErrorKind};
pub use query::Query;
pub use storage::{ImageStore, MockImageStore, StorageClient};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default storage bucket for product images.
pub const DEFAULT_IMAGE_BUCKET: &str = "images";

/// Configuration for connecting to the provider.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Project base URL, e.g. `"https://project.example.co"`.
    pub url: String,

    /// Public (anonymous) API key.
    pub anon_key: String,

    /// Bucket product images are uploaded to.
    pub image_bucket: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("url", &self.url)
            .field("anon_key", &"**redacted**")
            .field("image_bucket", &self.image_bucket)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Who a request is made as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The signed-in user when there is one, the anonymous key otherwise.
    Public,

    /// The signed-in user; fails with [`ProviderError::Unauthenticated`] without a session.
    User,
}

/// Shared HTTP client for the REST, auth and storage endpoints.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    config: Arc<ProviderConfig>,
    base: Url,
    http: Client,
    sessions: SessionStore,
}

impl ProviderClient {
    /// Create a client with an empty session store.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is not an absolute http(s) URL or the HTTP client
    /// cannot be built.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let base = Url::parse(&config.url).map_err(|error| ProviderError::InvalidUrl {
            url: config.url.clone(),
            reason: error.to_string(),
        })?;

        if base.cannot_be_a_base() {
            return Err(ProviderError::InvalidUrl {
                url: config.url.clone(),
                reason: "not a base URL".to_string(),
            });
        }

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            config: Arc::new(config),
            base,
            http,
            sessions: SessionStore::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// The signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Unauthenticated`] when there is no session.
    pub async fn current_user(&self) -> Result<User, ProviderError> {
        self.sessions
            .user()
            .await
            .ok_or(ProviderError::Unauthenticated)
    }

    /// `{base}/{service}/v1/{path}`
    pub(crate) fn url(&self, service: &str, path: &str) -> String {
        format!(
            "{}/{service}/v1/{path}",
            self.config.url.trim_end_matches('/')
        )
    }

    /// `{base}/{service}/v1/` followed by `segments`, each percent-encoded as one path segment.
    pub(crate) fn segment_url<I>(&self, service: &str, segments: I) -> Url
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base.clone();

        // Checked in `new`: the base URL always has path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(service).push("v1").extend(segments);
        }

        url
    }

    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
    }

    /// Bearer token for a request, refreshing an expiring session first.
    pub(crate) async fn bearer(&self, access: Access) -> Result<SecretToken, ProviderError> {
        let Some(session) = self.sessions.get().await else {
            return match access {
                Access::Public => Ok(SecretToken::new(self.config.anon_key.clone())),
                Access::User => Err(ProviderError::Unauthenticated),
            };
        };

        if !session.needs_refresh(Timestamp::now()) {
            return Ok(session.access_token);
        }

        debug!(user = %session.user.id, "refreshing session");

        match gotrue::refresh(self, &session.refresh_token).await {
            Ok(refreshed) => {
                let token = refreshed.access_token.clone();

                self.sessions.set(refreshed).await;

                Ok(token)
            }
            Err(error) => {
                warn!(%error, "session refresh failed, signing out locally");

                self.sessions.clear().await;

                Err(error)
            }
        }
    }

    /// Attach credentials, send, and turn non-2xx answers into [`ProviderError::Status`].
    pub(crate) async fn send(
        &self,
        builder: RequestBuilder,
        access: Access,
    ) -> Result<Response, ProviderError> {
        let token = self.bearer(access).await?;

        let response = builder.bearer_auth(token.expose()).send().await?;

        check(response).await
    }
}

pub(crate) async fn check(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();

    Err(ProviderError::from_body(status, &text))
}
