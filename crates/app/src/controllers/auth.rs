//! Auth Controller

use std::sync::Arc;

use storefront::forms::{LogInForm, PostcodeResult, SignUpForm};
use tracing::{error, info};

use crate::{
    auth::{AuthService, AuthServiceError},
    controllers::form_notice,
    notices::{Notice, Outcome, Route},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    LogIn,
    SignUp,
}

/// Log-in / sign-up screen.
pub struct AuthController {
    auth: Arc<dyn AuthService>,
    mode: AuthMode,
    log_in: LogInForm,
    sign_up: SignUpForm,
}

impl std::fmt::Debug for AuthController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthController")
            .field("mode", &self.mode)
            .field("email", &self.log_in.email)
            .finish_non_exhaustive()
    }
}

impl AuthController {
    #[must_use]
    pub fn new(auth: Arc<dyn AuthService>) -> Self {
        Self {
            auth,
            mode: AuthMode::default(),
            log_in: LogInForm::default(),
            sign_up: SignUpForm::default(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
    }

    pub fn log_in_form_mut(&mut self) -> &mut LogInForm {
        &mut self.log_in
    }

    #[must_use]
    pub fn sign_up_form(&self) -> &SignUpForm {
        &self.sign_up
    }

    pub fn sign_up_form_mut(&mut self) -> &mut SignUpForm {
        &mut self.sign_up
    }

    pub fn apply_postcode(&mut self, result: &PostcodeResult) {
        self.sign_up.contact.apply_postcode(result);
    }

    /// Submit the form for the current mode.
    pub async fn submit(&mut self) -> Outcome {
        match self.mode {
            AuthMode::LogIn => self.log_in().await,
            AuthMode::SignUp => self.sign_up().await,
        }
    }

    async fn log_in(&mut self) -> Outcome {
        let (email, password) = match self.log_in.validate() {
            Ok(credentials) => credentials,
            Err(error) => return Outcome::notice(form_notice(&error)),
        };

        match self.auth.sign_in(email, password).await {
            Ok(user) => {
                info!(user = %user.id, "logged in");

                self.log_in.password.clear();

                Outcome::navigate(Route::Home)
            }
            Err(error) => Outcome::notice(into_notice(error)),
        }
    }

    async fn sign_up(&mut self) -> Outcome {
        let submission = match self.sign_up.validate() {
            Ok(submission) => submission,
            Err(error) => return Outcome::notice(form_notice(&error)),
        };

        let email = submission.email.clone();
        let password = submission.password.clone();

        if let Err(error) = self.auth.sign_up(submission).await {
            return Outcome::notice(into_notice(error));
        }

        self.sign_up.clear();

        match self.auth.sign_in(email, password).await {
            Ok(user) => {
                info!(user = %user.id, "signed up");

                Outcome::navigate(Route::Home).with_notice(Notice::success("Welcome!"))
            }
            Err(error) => Outcome::notice(into_notice(error)),
        }
    }
}

pub(crate) fn into_notice(error: AuthServiceError) -> Notice {
    match error {
        AuthServiceError::InvalidCredentials => Notice::error("Wrong email or password"),
        AuthServiceError::AlreadyRegistered => {
            Notice::warning("An account with that email already exists")
        }
        AuthServiceError::Unauthorized => Notice::warning("Please log in first"),
        AuthServiceError::Provider(source) => {
            error!("auth request failed: {source}");

            Notice::error("Could not reach the store, please try again")
        }
    }
}

#[cfg(test)]
mod tests {
    use storefront::forms::{Field, FormError};
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;
    use crate::{
        auth::{MockAuthService, User},
        notices::NoticeLevel,
    };

    fn user() -> User {
        User {
            id: Uuid::now_v7().into(),
            email: Some("kim@example.com".to_string()),
        }
    }

    fn filled_sign_up(form: &mut SignUpForm) {
        form.email = "kim@example.com".to_string();
        form.password = "hunter22".to_string();
        form.confirm_password = "hunter22".to_string();
        form.contact.name = "Kim".to_string();
        form.contact.zip_code = "06236".to_string();
        form.contact.address = "Teheran-ro 152".to_string();
        form.contact.address_detail = "12F".to_string();
        form.contact.phone.middle = "1234".to_string();
        form.contact.phone.last = "5678".to_string();
    }

    #[tokio::test]
    async fn log_in_goes_home() {
        let mut auth = MockAuthService::new();

        auth.expect_sign_in()
            .once()
            .withf(|email, password| email == "kim@example.com" && password == "hunter22")
            .return_once(|_, _| Ok(user()));

        let mut controller = AuthController::new(Arc::new(auth));
        controller.log_in_form_mut().email = "kim@example.com".to_string();
        controller.log_in_form_mut().password = "hunter22".to_string();

        let outcome = controller.submit().await;

        assert_eq!(outcome.route, Some(Route::Home));
    }

    #[tokio::test]
    async fn empty_log_in_sends_nothing() {
        let mut auth = MockAuthService::new();
        auth.expect_sign_in().never();

        let mut controller = AuthController::new(Arc::new(auth));

        let outcome = controller.submit().await;

        assert_eq!(
            outcome.notice,
            Some(form_notice(&FormError::Required(Field::Email)))
        );
        assert_eq!(outcome.route, None);
    }

    #[tokio::test]
    async fn wrong_password_is_an_error_notice() {
        let mut auth = MockAuthService::new();
        auth.expect_sign_in()
            .once()
            .return_once(|_, _| Err(AuthServiceError::InvalidCredentials));

        let mut controller = AuthController::new(Arc::new(auth));
        controller.log_in_form_mut().email = "kim@example.com".to_string();
        controller.log_in_form_mut().password = "nope".to_string();

        let outcome = controller.submit().await;

        assert_eq!(
            outcome.notice.map(|notice| notice.level),
            Some(NoticeLevel::Error)
        );
    }

    #[tokio::test]
    async fn sign_up_registers_clears_and_signs_in() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_sign_up()
            .once()
            .withf(|submission| {
                submission.email == "kim@example.com"
                    && submission.profile.phone == "010-1234-5678"
            })
            .return_once(|_| Ok(()));

        auth.expect_sign_in()
            .once()
            .withf(|email, password| email == "kim@example.com" && password == "hunter22")
            .return_once(|_, _| Ok(user()));

        let mut controller = AuthController::new(Arc::new(auth));
        controller.set_mode(AuthMode::SignUp);
        filled_sign_up(controller.sign_up_form_mut());

        let outcome = controller.submit().await;

        assert_eq!(outcome.route, Some(Route::Home));
        assert_eq!(controller.sign_up_form(), &SignUpForm::default());

        Ok(())
    }

    #[tokio::test]
    async fn mismatched_passwords_block_sign_up() {
        let mut auth = MockAuthService::new();
        auth.expect_sign_up().never();
        auth.expect_sign_in().never();

        let mut controller = AuthController::new(Arc::new(auth));
        controller.set_mode(AuthMode::SignUp);
        filled_sign_up(controller.sign_up_form_mut());
        controller.sign_up_form_mut().confirm_password = "other".to_string();

        let outcome = controller.submit().await;

        assert_eq!(
            outcome.notice,
            Some(form_notice(&FormError::PasswordMismatch))
        );
    }
}
