//! Profile Controller

use std::sync::Arc;

use storefront::forms::{PostcodeResult, ProfileForm};
use tracing::{error, info};

use crate::{
    auth::AuthService,
    controllers::{auth, form_notice},
    domain::profiles::{ProfilesService, ProfilesServiceError},
    notices::{Notice, Outcome, Route},
};

/// My Page profile screen.
pub struct ProfileController {
    profiles: Arc<dyn ProfilesService>,
    auth: Arc<dyn AuthService>,
    form: ProfileForm,
}

impl std::fmt::Debug for ProfileController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileController")
            .field("email", &self.form.email)
            .finish_non_exhaustive()
    }
}

impl ProfileController {
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfilesService>, auth: Arc<dyn AuthService>) -> Self {
        Self {
            profiles,
            auth,
            form: ProfileForm::default(),
        }
    }

    #[must_use]
    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProfileForm {
        &mut self.form
    }

    /// Fetch the profile into the form, replacing any unsaved edits.
    ///
    /// # Errors
    ///
    /// Returns an error notice when the request fails.
    pub async fn load(&mut self) -> Result<(), Notice> {
        let profile = self.profiles.get_profile().await.map_err(into_notice)?;

        self.form = profile.form();

        Ok(())
    }

    pub fn apply_postcode(&mut self, result: &PostcodeResult) {
        self.form.contact.apply_postcode(result);
    }

    /// Save the profile, and the password when a new one was entered.
    pub async fn submit(&mut self) -> Outcome {
        let submission = match self.form.validate() {
            Ok(submission) => submission,
            Err(error) => return Outcome::notice(form_notice(&error)),
        };

        if let Some(password) = submission.new_password
            && let Err(error) = self.auth.update_password(password).await
        {
            return Outcome::notice(auth::into_notice(error));
        }

        if let Err(error) = self.profiles.update_profile(submission.profile).await {
            return Outcome::notice(into_notice(error));
        }

        info!("profile updated");

        self.form.clear_passwords();

        match self.load().await {
            Ok(()) => Outcome::notice(Notice::success("Profile updated")),
            Err(notice) => Outcome::notice(notice),
        }
    }

    /// Sign out and go home. The profile is dropped from the screen even when the provider
    /// reports a failure.
    pub async fn sign_out(&mut self) -> Outcome {
        let result = self.auth.sign_out().await;

        self.form = ProfileForm::default();

        let outcome = Outcome::navigate(Route::Home);

        match result {
            Ok(()) => outcome,
            Err(error) => outcome.with_notice(auth::into_notice(error)),
        }
    }
}

fn into_notice(error: ProfilesServiceError) -> Notice {
    match error {
        ProfilesServiceError::Unauthorized => Notice::warning("Please log in first"),
        ProfilesServiceError::NotFound => Notice::error("Profile not found"),
        ProfilesServiceError::InvalidData => Notice::error("The profile data is invalid"),
        ProfilesServiceError::Provider(source) => {
            error!("profile request failed: {source}");

            Notice::error("Could not reach the store, please try again")
        }
    }
}

#[cfg(test)]
mod tests {
    use storefront::forms::{AddressType, FormError, ProfileFields};
    use testresult::TestResult;

    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use super::*;
    use crate::{
        auth::{AuthServiceError, MockAuthService, ProviderAuthService, session::tests::session},
        provider::tests::client,
        domain::profiles::{MockProfilesService, Profile},
        notices::NoticeLevel,
    };

    fn profile() -> Profile {
        Profile {
            email: "kim@example.com".to_string(),
            fields: ProfileFields {
                name: "Kim".to_string(),
                zip_code: "06236".to_string(),
                address: "Teheran-ro 152".to_string(),
                address_detail: "12F".to_string(),
                phone: "010-1234-5678".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn load_fills_the_form() -> TestResult {
        let mut profiles = MockProfilesService::new();
        profiles
            .expect_get_profile()
            .once()
            .return_once(|| Ok(profile()));

        let mut controller =
            ProfileController::new(Arc::new(profiles), Arc::new(MockAuthService::new()));

        controller.load().await?;

        assert_eq!(controller.form().email, "kim@example.com");
        assert_eq!(controller.form().contact.phone.last, "5678");

        Ok(())
    }

    #[tokio::test]
    async fn submit_without_password_only_updates_profile() -> TestResult {
        let mut profiles = MockProfilesService::new();
        profiles
            .expect_get_profile()
            .times(2)
            .returning(|| Ok(profile()));
        profiles
            .expect_update_profile()
            .once()
            .withf(|fields| fields.address == "Gangnam-daero 1 (Yeoksam-dong, Tower)")
            .return_once(|_| Ok(()));

        let mut auth = MockAuthService::new();
        auth.expect_update_password().never();

        let mut controller = ProfileController::new(Arc::new(profiles), Arc::new(auth));
        controller.load().await?;

        controller.apply_postcode(&PostcodeResult {
            zonecode: "06232".to_string(),
            address: "Gangnam-daero 1".to_string(),
            address_type: AddressType::Road,
            bname: "Yeoksam-dong".to_string(),
            building_name: "Tower".to_string(),
        });

        let outcome = controller.submit().await;

        assert_eq!(
            outcome.notice.map(|notice| notice.level),
            Some(NoticeLevel::Success)
        );

        Ok(())
    }

    #[tokio::test]
    async fn matching_passwords_update_credentials_then_clear() -> TestResult {
        let mut profiles = MockProfilesService::new();
        profiles
            .expect_get_profile()
            .times(2)
            .returning(|| Ok(profile()));
        profiles
            .expect_update_profile()
            .once()
            .return_once(|_| Ok(()));

        let mut auth = MockAuthService::new();
        auth.expect_update_password()
            .once()
            .withf(|password| password == "n3w-secret")
            .return_once(|_| Ok(()));

        let mut controller = ProfileController::new(Arc::new(profiles), Arc::new(auth));
        controller.load().await?;
        controller.form_mut().password = "n3w-secret".to_string();
        controller.form_mut().confirm_password = "n3w-secret".to_string();

        controller.submit().await;

        assert!(controller.form().password.is_empty(), "password must be cleared");
        assert!(
            controller.form().confirm_password.is_empty(),
            "confirmation must be cleared"
        );

        Ok(())
    }

    #[tokio::test]
    async fn mismatched_passwords_write_nothing() -> TestResult {
        let mut profiles = MockProfilesService::new();
        profiles
            .expect_get_profile()
            .once()
            .return_once(|| Ok(profile()));
        profiles.expect_update_profile().never();

        let mut auth = MockAuthService::new();
        auth.expect_update_password().never();

        let mut controller = ProfileController::new(Arc::new(profiles), Arc::new(auth));
        controller.load().await?;
        controller.form_mut().password = "one".to_string();

        let outcome = controller.submit().await;

        assert_eq!(
            outcome.notice,
            Some(form_notice(&FormError::PasswordMismatch))
        );

        Ok(())
    }

    #[tokio::test]
    async fn sign_out_goes_home() {
        let mut auth = MockAuthService::new();
        auth.expect_sign_out().once().return_once(|| Ok(()));

        let mut controller =
            ProfileController::new(Arc::new(MockProfilesService::new()), Arc::new(auth));

        let outcome = controller.sign_out().await;

        assert_eq!(outcome.route, Some(Route::Home));
    }

    #[tokio::test]
    async fn sign_out_with_rejected_revoke_still_goes_home() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server.uri());
        client.sessions().set(session("expired")).await;

        let mut controller = ProfileController::new(
            Arc::new(MockProfilesService::new()),
            Arc::new(ProviderAuthService::new(client.clone())),
        );
        controller.form_mut().contact.name = "Kim".to_string();

        let outcome = controller.sign_out().await;

        assert_eq!(outcome, Outcome::navigate(Route::Home));
        assert!(controller.form().contact.name.is_empty(), "profile must be cleared");
        assert!(!client.sessions().is_signed_in().await);

        Ok(())
    }

    #[tokio::test]
    async fn failed_sign_out_still_leaves_the_profile() {
        let mut auth = MockAuthService::new();
        auth.expect_sign_out()
            .once()
            .return_once(|| Err(AuthServiceError::Unauthorized));

        let mut controller =
            ProfileController::new(Arc::new(MockProfilesService::new()), Arc::new(auth));

        let outcome = controller.sign_out().await;

        assert_eq!(outcome.route, Some(Route::Home));
        assert!(outcome.notice.is_some(), "failure is still reported");
    }
}
