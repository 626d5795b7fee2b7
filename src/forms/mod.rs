//! Forms
//!
//! Typed form state with field-level validation. Validation runs before any
//! request is made; a valid form converts into the payload the request needs.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

pub mod account;
pub mod address;
pub mod categories;
pub mod phone;
pub mod product;

pub use account::{
    ContactSection, LogInForm, ProfileFields, ProfileForm, ProfileSubmission, SignUpForm,
    SignUpSubmission,
};
pub use address::{AddressType, PostcodeResult};
pub use categories::{MainCategory, SubCategory, UnknownProductCategory};
pub use phone::PhoneNumber;
pub use product::{
    EditOptionRow, ImageUpload, OptionRow, ProductEditForm, ProductEditSubmission, ProductForm,
    ProductOption, ProductSubmission,
};

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Display name
    Name,
    /// Email address
    Email,
    /// Password
    Password,
    /// Password confirmation
    ConfirmPassword,
    /// Postal code
    ZipCode,
    /// Street address
    Address,
    /// Address detail
    AddressDetail,
    /// Phone number
    Phone,
    /// Product price
    Price,
    /// Product main category
    MainCategory,
    /// Product sub category
    SubCategory,
    /// Product image
    Image,
    /// Color/size/stock option rows
    Options,
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "password confirmation",
            Self::ZipCode => "zip code",
            Self::Address => "address",
            Self::AddressDetail => "address detail",
            Self::Phone => "phone",
            Self::Price => "price",
            Self::MainCategory => "main category",
            Self::SubCategory => "sub category",
            Self::Image => "image",
            Self::Options => "options",
        })
    }
}

/// Field-level validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// A required field was left empty.
    #[error("{0} is required")]
    Required(Field),

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Price is not a positive whole number.
    #[error("price must be a positive whole number")]
    InvalidPrice,

    /// Sub category does not belong to the chosen main category.
    #[error("{sub} is not a sub category of {main}")]
    SubCategoryMismatch {
        /// Chosen main category
        main: MainCategory,
        /// Chosen sub category
        sub: SubCategory,
    },

    /// An option row has a color but is missing its size or stock.
    #[error("option row {0} needs a color, a size and a stock count")]
    IncompleteOption(usize),

    /// An option row's stock is not a whole number.
    #[error("option row {0} has an invalid stock count")]
    InvalidStock(usize),
}

pub(crate) fn required(value: &str, field: Field) -> Result<String, FormError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(FormError::Required(field));
    }

    Ok(trimmed.to_string())
}
