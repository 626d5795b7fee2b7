//! Phone numbers

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::forms::{Field, FormError};

/// Default first part of a mobile number.
pub const MOBILE_PREFIX: &str = "010";

/// A phone number edited as three dash-separated parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// Area or carrier prefix
    pub first: String,

    /// Middle part
    pub middle: String,

    /// Last part
    pub last: String,
}

impl PhoneNumber {
    /// Empty number with the mobile prefix filled in.
    #[must_use]
    pub fn mobile() -> Self {
        Self {
            first: MOBILE_PREFIX.to_string(),
            ..Self::default()
        }
    }

    /// Split a stored `a-b-c` number. Missing parts stay empty.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let mut parts = value.splitn(3, '-').map(|part| part.trim().to_string());

        Self {
            first: parts.next().unwrap_or_default(),
            middle: parts.next().unwrap_or_default(),
            last: parts.next().unwrap_or_default(),
        }
    }

    /// Join the parts for storage.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Required`] when any part is empty.
    pub fn joined(&self) -> Result<String, FormError> {
        if [&self.first, &self.middle, &self.last]
            .iter()
            .any(|part| part.trim().is_empty())
        {
            return Err(FormError::Required(Field::Phone));
        }

        Ok(self.to_string())
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}-{}-{}",
            self.first.trim(),
            self.middle.trim(),
            self.last.trim()
        )
    }
}
