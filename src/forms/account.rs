//! Log-in, sign-up and profile forms

use serde::{Deserialize, Serialize};

use crate::forms::{Field, FormError, PhoneNumber, PostcodeResult, required};

/// Log-in form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LogInForm {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

impl LogInForm {
    /// Validate and return the trimmed email with the password.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Required`] when either field is empty.
    pub fn validate(&self) -> Result<(String, String), FormError> {
        let email = required(&self.email, Field::Email)?;

        if self.password.is_empty() {
            return Err(FormError::Required(Field::Password));
        }

        Ok((email, self.password.clone()))
    }
}

/// Profile fields shared by sign-up metadata and profile updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
    /// Display name
    pub name: String,

    /// Postal code
    pub zip_code: String,

    /// Street address
    pub address: String,

    /// Address detail
    pub address_detail: String,

    /// Dash-joined phone number
    pub phone: String,
}

/// Address and phone section shared by the sign-up and profile forms.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContactSection {
    /// Display name
    pub name: String,

    /// Postal code
    pub zip_code: String,

    /// Street address
    pub address: String,

    /// Address detail
    pub address_detail: String,

    /// Phone parts
    pub phone: PhoneNumber,
}

impl Default for ContactSection {
    fn default() -> Self {
        Self {
            name: String::new(),
            zip_code: String::new(),
            address: String::new(),
            address_detail: String::new(),
            phone: PhoneNumber::mobile(),
        }
    }
}

impl ContactSection {
    /// Apply a postcode lookup: zone code into the zip code, composed address into the address.
    pub fn apply_postcode(&mut self, result: &PostcodeResult) {
        self.zip_code.clone_from(&result.zonecode);
        self.address = result.full_address();
    }

    fn validate(&self) -> Result<ProfileFields, FormError> {
        Ok(ProfileFields {
            name: required(&self.name, Field::Name)?,
            zip_code: required(&self.zip_code, Field::ZipCode)?,
            address: required(&self.address, Field::Address)?,
            address_detail: required(&self.address_detail, Field::AddressDetail)?,
            phone: self.phone.joined()?,
        })
    }
}

/// Sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignUpForm {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,

    /// Password confirmation
    pub confirm_password: String,

    /// Profile section
    #[serde(flatten)]
    pub contact: ContactSection,
}

/// Validated sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpSubmission {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,

    /// User metadata sent with the sign-up
    pub profile: ProfileFields,
}

impl SignUpForm {
    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Required`] for the first empty field, or
    /// [`FormError::PasswordMismatch`] when the confirmation differs.
    pub fn validate(&self) -> Result<SignUpSubmission, FormError> {
        let email = required(&self.email, Field::Email)?;

        if self.password.is_empty() {
            return Err(FormError::Required(Field::Password));
        }

        if self.confirm_password.is_empty() {
            return Err(FormError::Required(Field::ConfirmPassword));
        }

        let profile = self.contact.validate()?;

        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }

        Ok(SignUpSubmission {
            email,
            password: self.password.clone(),
            profile,
        })
    }

    /// Reset every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// My Page profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileForm {
    /// Email shown read-only
    #[serde(default)]
    pub email: String,

    /// Editable profile section
    #[serde(flatten)]
    pub contact: ContactSection,

    /// New password, empty to keep the current one
    #[serde(default)]
    pub password: String,

    /// New password confirmation
    #[serde(default)]
    pub confirm_password: String,
}

/// Validated profile update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSubmission {
    /// Profile row values
    pub profile: ProfileFields,

    /// Credential update, when a new password was entered
    pub new_password: Option<String>,
}

impl ProfileForm {
    /// Form populated from stored values.
    #[must_use]
    pub fn from_fields(email: String, fields: ProfileFields) -> Self {
        Self {
            email,
            contact: ContactSection {
                name: fields.name,
                zip_code: fields.zip_code,
                address: fields.address,
                address_detail: fields.address_detail,
                phone: PhoneNumber::parse(&fields.phone),
            },
            password: String::new(),
            confirm_password: String::new(),
        }
    }

    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Required`] for the first empty profile field, or
    /// [`FormError::PasswordMismatch`] when either password field is set and they differ.
    pub fn validate(&self) -> Result<ProfileSubmission, FormError> {
        let profile = self.contact.validate()?;

        let new_password = if self.password.is_empty() && self.confirm_password.is_empty() {
            None
        } else if self.password == self.confirm_password {
            Some(self.password.clone())
        } else {
            return Err(FormError::PasswordMismatch);
        };

        Ok(ProfileSubmission {
            profile,
            new_password,
        })
    }

    /// Clear both password fields.
    pub fn clear_passwords(&mut self) {
        self.password.clear();
        self.confirm_password.clear();
    }
}
