//! Profile Models

use storefront::forms::{ProfileFields, ProfileForm};

/// The signed-in user's profile as shown on My Page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    /// Account email, taken from the session
    pub email: String,
    pub fields: ProfileFields,
}

impl Profile {
    /// A profile form pre-filled with this profile and empty password fields.
    #[must_use]
    pub fn form(&self) -> ProfileForm {
        ProfileForm::from_fields(self.email.clone(), self.fields.clone())
    }
}
