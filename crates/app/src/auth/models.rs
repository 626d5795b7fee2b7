//! Auth data models.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id of a session provider user; also the key of their profile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserUuid(Uuid);

impl UserUuid {
    #[must_use]
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for UserUuid {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl Display for UserUuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// A user as reported by the session provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: UserUuid,

    #[serde(default)]
    pub email: Option<String>,
}
