//! Session provider client: sign-up, token grants, sign-out and user updates.

use jiff::Timestamp;
use reqwest::Method;
use serde::Serialize;
use serde_json::json;
use storefront::forms::ProfileFields;
use tracing::debug;

use crate::{
    auth::{SecretToken, Session, User, session::TokenResponse},
    provider::{Access, ProviderClient, ProviderError, check},
};

/// HTTP client for the session provider endpoints.
#[derive(Debug, Clone)]
pub struct GoTrueClient {
    client: ProviderClient,
}

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: &'a ProfileFields,
}

impl GoTrueClient {
    #[must_use]
    pub fn new(client: ProviderClient) -> Self {
        Self { client }
    }

    /// Register a user with profile metadata.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a non-2xx response.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &ProfileFields,
    ) -> Result<(), ProviderError> {
        debug!(email, "signing up");

        let request = self
            .client
            .request(Method::POST, &self.client.url("auth", "signup"))
            .json(&SignUpRequest {
                email,
                password,
                data: metadata,
            });

        self.client.send(request, Access::Public).await?;

        Ok(())
    }

    /// Exchange email and password for a session.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure, rejected credentials, or an unexpected body.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, ProviderError> {
        debug!(email, "signing in");

        grant(
            &self.client,
            "password",
            &json!({ "email": email, "password": password }),
        )
        .await
    }

    /// Revoke the session's tokens.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a non-2xx response.
    pub async fn logout(&self, access_token: &SecretToken) -> Result<(), ProviderError> {
        let request = self
            .client
            .request(Method::POST, &self.client.url("auth", "logout"))
            .bearer_auth(access_token.expose());

        check(request.send().await?).await?;

        Ok(())
    }

    /// The user behind the current session.
    ///
    /// # Errors
    ///
    /// Returns an error without a session, on HTTP failure, or on an unexpected body.
    pub async fn get_user(&self) -> Result<User, ProviderError> {
        let request = self
            .client
            .request(Method::GET, &self.client.url("auth", "user"));

        Ok(self.client.send(request, Access::User).await?.json().await?)
    }

    /// Change the signed-in user's password.
    ///
    /// # Errors
    ///
    /// Returns an error without a session, on HTTP failure, or on an unexpected body.
    pub async fn update_password(&self, password: &str) -> Result<User, ProviderError> {
        let request = self
            .client
            .request(Method::PUT, &self.client.url("auth", "user"))
            .json(&json!({ "password": password }));

        Ok(self.client.send(request, Access::User).await?.json().await?)
    }
}

/// Exchange a refresh token for a new session.
pub(crate) async fn refresh(
    client: &ProviderClient,
    refresh_token: &SecretToken,
) -> Result<Session, ProviderError> {
    grant(
        client,
        "refresh_token",
        &json!({ "refresh_token": refresh_token.expose() }),
    )
    .await
}

async fn grant(
    client: &ProviderClient,
    grant_type: &str,
    body: &serde_json::Value,
) -> Result<Session, ProviderError> {
    let request = client
        .request(
            Method::POST,
            &client.url("auth", &format!("token?grant_type={grant_type}")),
        )
        .bearer_auth(&client.config().anon_key)
        .json(body);

    let response = check(request.send().await?).await?;

    let parsed: TokenResponse = response.json().await?;

    parsed.into_session(Timestamp::now())
}
