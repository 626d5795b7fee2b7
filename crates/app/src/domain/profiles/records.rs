//! Profile Records

use serde::{Deserialize, Serialize};
use storefront::forms::ProfileFields;

pub(crate) const PROFILE_COLUMNS: &str = "id, name, zip_code, address, address_detail, phone";

/// `user_profiles` row; unset columns read as empty strings.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProfileRecord {
    pub name: Option<String>,
    pub zip_code: Option<String>,
    pub address: Option<String>,
    pub address_detail: Option<String>,
    pub phone: Option<String>,
}

impl From<ProfileRecord> for ProfileFields {
    fn from(record: ProfileRecord) -> Self {
        Self {
            name: record.name.unwrap_or_default(),
            zip_code: record.zip_code.unwrap_or_default(),
            address: record.address.unwrap_or_default(),
            address_detail: record.address_detail.unwrap_or_default(),
            phone: record.phone.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ProfileChangesRecord<'a> {
    pub name: &'a str,
    pub zip_code: &'a str,
    pub address: &'a str,
    pub address_detail: &'a str,
    pub phone: &'a str,
}

impl<'a> From<&'a ProfileFields> for ProfileChangesRecord<'a> {
    fn from(fields: &'a ProfileFields) -> Self {
        Self {
            name: &fields.name,
            zip_code: &fields.zip_code,
            address: &fields.address,
            address_detail: &fields.address_detail,
            phone: &fields.phone,
        }
    }
}
