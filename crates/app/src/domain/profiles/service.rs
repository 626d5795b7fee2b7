//! Profiles service.

use async_trait::async_trait;
use mockall::automock;
use storefront::forms::ProfileFields;
use tracing::info;

use crate::{
    domain::profiles::{
        errors::ProfilesServiceError,
        models::Profile,
        records::ProfileChangesRecord,
        repository::ProviderProfilesRepository,
    },
    provider::ProviderClient,
};

#[derive(Debug, Clone)]
pub struct ProviderProfilesService {
    client: ProviderClient,
    repository: ProviderProfilesRepository,
}

impl ProviderProfilesService {
    #[must_use]
    pub fn new(client: ProviderClient) -> Self {
        Self {
            repository: ProviderProfilesRepository::new(client.clone()),
            client,
        }
    }
}

#[async_trait]
impl ProfilesService for ProviderProfilesService {
    async fn get_profile(&self) -> Result<Profile, ProfilesServiceError> {
        let user = self.client.current_user().await?;

        let record = self.repository.get_profile(user.id).await?;

        Ok(Profile {
            email: user.email.unwrap_or_default(),
            fields: ProfileFields::from(record),
        })
    }

    async fn update_profile(&self, fields: ProfileFields) -> Result<(), ProfilesServiceError> {
        let user = self.client.current_user().await?;

        self.repository
            .update_profile(user.id, &ProfileChangesRecord::from(&fields))
            .await?;

        info!(user = %user.id, "updated profile");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProfilesService: Send + Sync {
    /// Profile of the signed-in user, with the email from the session.
    async fn get_profile(&self) -> Result<Profile, ProfilesServiceError>;

    /// Overwrite the signed-in user's profile row.
    async fn update_profile(&self, fields: ProfileFields) -> Result<(), ProfilesServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path, query_param},
    };

    use super::*;
    use crate::{auth::session::tests::session, provider::tests::client};

    #[tokio::test]
    async fn profile_combines_row_and_session_email() -> TestResult {
        let server = MockServer::start().await;
        let client = client(&server.uri());
        let session = session("user-token");
        let user = session.user.id;

        client.sessions().set(session).await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/user_profiles"))
            .and(header("Accept", "application/vnd.pgrst.object+json"))
            .and(query_param("id", format!("eq.{user}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": user,
                "name": "Kim",
                "zip_code": "04524",
                "address": null,
                "address_detail": "3F",
                "phone": "010-1234-5678"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let profile = ProviderProfilesService::new(client).get_profile().await?;

        assert_eq!(profile.email, "kim@example.com");
        assert_eq!(profile.fields.name, "Kim");
        assert_eq!(profile.fields.address, "");

        let form = profile.form();
        assert_eq!(form.contact.phone.middle, "1234");

        Ok(())
    }

    #[tokio::test]
    async fn missing_row_is_not_found() {
        let server = MockServer::start().await;
        let client = client(&server.uri());

        client.sessions().set(session("user-token")).await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/user_profiles"))
            .respond_with(
                ResponseTemplate::new(406).set_body_json(json!({ "message": "0 rows" })),
            )
            .mount(&server)
            .await;

        let result = ProviderProfilesService::new(client).get_profile().await;

        assert!(
            matches!(result, Err(ProfilesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_writes_snake_case_columns() -> TestResult {
        let server = MockServer::start().await;
        let client = client(&server.uri());
        let session = session("user-token");
        let user = session.user.id;

        client.sessions().set(session).await;

        Mock::given(method("PATCH"))
            .and(path("/rest/v1/user_profiles"))
            .and(query_param("id", format!("eq.{user}")))
            .and(body_json(json!({
                "name": "Kim",
                "zip_code": "04524",
                "address": "Seoul",
                "address_detail": "3F",
                "phone": "010-1234-5678"
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        ProviderProfilesService::new(client)
            .update_profile(ProfileFields {
                name: "Kim".to_string(),
                zip_code: "04524".to_string(),
                address: "Seoul".to_string(),
                address_detail: "3F".to_string(),
                phone: "010-1234-5678".to_string(),
            })
            .await?;

        Ok(())
    }
}
