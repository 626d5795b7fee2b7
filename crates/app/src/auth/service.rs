//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use storefront::forms::SignUpSubmission;
use tracing::{info, warn};

use crate::{
    auth::{AuthServiceError, User, gotrue::GoTrueClient},
    provider::{ProviderClient, ProviderErrorKind},
};

#[derive(Debug, Clone)]
pub struct ProviderAuthService {
    client: ProviderClient,
    gotrue: GoTrueClient,
}

impl ProviderAuthService {
    #[must_use]
    pub fn new(client: ProviderClient) -> Self {
        Self {
            gotrue: GoTrueClient::new(client.clone()),
            client,
        }
    }
}

#[async_trait]
impl AuthService for ProviderAuthService {
    async fn sign_up(&self, submission: SignUpSubmission) -> Result<(), AuthServiceError> {
        self.gotrue
            .sign_up(&submission.email, &submission.password, &submission.profile)
            .await
            .map_err(|error| match error.kind() {
                ProviderErrorKind::AlreadyExists | ProviderErrorKind::InvalidData => {
                    AuthServiceError::AlreadyRegistered
                }
                _ => AuthServiceError::from(error),
            })?;

        info!(email = %submission.email, "signed up");

        Ok(())
    }

    async fn sign_in(&self, email: String, password: String) -> Result<User, AuthServiceError> {
        let session = self
            .gotrue
            .sign_in_with_password(&email, &password)
            .await
            .map_err(|error| match error.kind() {
                ProviderErrorKind::InvalidData | ProviderErrorKind::Unauthorized => {
                    AuthServiceError::InvalidCredentials
                }
                _ => AuthServiceError::from(error),
            })?;

        let user = session.user.clone();

        self.client.sessions().set(session).await;

        info!(user = %user.id, "signed in");

        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthServiceError> {
        let Some(session) = self.client.sessions().clear().await else {
            return Ok(());
        };

        // Signed out locally from here on; a failed revoke leaves the token to expire.
        match self.gotrue.logout(&session.access_token).await {
            Ok(()) => info!(user = %session.user.id, "signed out"),
            Err(error) => warn!(%error, user = %session.user.id, "remote sign-out failed"),
        }

        Ok(())
    }

    async fn current_user(&self) -> Result<User, AuthServiceError> {
        self.client
            .sessions()
            .user()
            .await
            .ok_or(AuthServiceError::Unauthorized)
    }

    async fn update_password(&self, password: String) -> Result<(), AuthServiceError> {
        let user = self.gotrue.update_password(&password).await?;

        info!(user = %user.id, "password updated");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user with profile metadata.
    async fn sign_up(&self, submission: SignUpSubmission) -> Result<(), AuthServiceError>;

    /// Sign in and store the session.
    async fn sign_in(&self, email: String, password: String) -> Result<User, AuthServiceError>;

    /// Clear the stored session and revoke it remotely. A failed revoke is logged, not
    /// returned: the user is signed out locally either way.
    async fn sign_out(&self) -> Result<(), AuthServiceError>;

    /// The signed-in user.
    async fn current_user(&self) -> Result<User, AuthServiceError>;

    /// Change the signed-in user's password.
    async fn update_password(&self, password: String) -> Result<(), AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use super::*;
    use crate::{auth::session::tests::session, provider::tests::client};

    #[tokio::test]
    async fn sign_in_stores_the_session() -> TestResult {
        let server = MockServer::start().await;
        let user = Uuid::now_v7();

        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "access-1",
                "expires_in": 3600,
                "refresh_token": "refresh-1",
                "user": { "id": user, "email": "kim@example.com" }
            })))
            .mount(&server)
            .await;

        let client = client(&server.uri());
        let service = ProviderAuthService::new(client.clone());

        let signed_in = service
            .sign_in("kim@example.com".to_string(), "hunter22".to_string())
            .await?;

        assert_eq!(signed_in.id.into_uuid(), user);
        assert!(client.sessions().is_signed_in().await);
        assert_eq!(service.current_user().await?.id.into_uuid(), user);

        Ok(())
    }

    #[tokio::test]
    async fn bad_credentials_are_reported_as_such() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_grant" })),
            )
            .mount(&server)
            .await;

        let client = client(&server.uri());
        let result = ProviderAuthService::new(client.clone())
            .sign_in("kim@example.com".to_string(), "nope".to_string())
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
        assert!(!client.sessions().is_signed_in().await);
    }

    #[tokio::test]
    async fn sign_out_clears_the_session() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server.uri());
        client.sessions().set(session("access-1")).await;

        let service = ProviderAuthService::new(client.clone());
        service.sign_out().await?;

        assert!(!client.sessions().is_signed_in().await);
        assert!(
            matches!(
                service.current_user().await,
                Err(AuthServiceError::Unauthorized)
            ),
            "no user after sign-out"
        );

        Ok(())
    }

    #[tokio::test]
    async fn sign_out_with_expired_token_still_signs_out() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "msg": "JWT expired" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server.uri());
        client.sessions().set(session("expired")).await;

        ProviderAuthService::new(client.clone()).sign_out().await?;

        assert!(!client.sessions().is_signed_in().await);

        Ok(())
    }

    #[tokio::test]
    async fn sign_out_without_session_is_a_no_op() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        ProviderAuthService::new(client(&server.uri()))
            .sign_out()
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn password_update_needs_a_session() {
        let server = MockServer::start().await;

        let result = ProviderAuthService::new(client(&server.uri()))
            .update_password("new-secret".to_string())
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );
    }
}
