//! Postcode lookups

use serde::{Deserialize, Serialize};

/// Address kind reported by the postcode lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressType {
    /// Road-name address (`R`)
    #[serde(rename = "R")]
    #[default]
    Road,

    /// Lot-number address (`J`)
    #[serde(rename = "J")]
    Jibun,
}

/// Result of a postcode lookup, as returned by the address search widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostcodeResult {
    /// Five digit zone code
    pub zonecode: String,

    /// Base address
    pub address: String,

    /// Address kind
    pub address_type: AddressType,

    /// Legal district name
    #[serde(default)]
    pub bname: String,

    /// Building name
    #[serde(default)]
    pub building_name: String,
}

impl PostcodeResult {
    /// Full display address.
    ///
    /// Road addresses get the district and building names appended in parentheses.
    #[must_use]
    pub fn full_address(&self) -> String {
        if self.address_type != AddressType::Road {
            return self.address.clone();
        }

        let extra = [self.bname.trim(), self.building_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        if extra.is_empty() {
            self.address.clone()
        } else {
            format!("{} ({extra})", self.address)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(address_type: AddressType, bname: &str, building_name: &str) -> PostcodeResult {
        PostcodeResult {
            zonecode: "06236".to_string(),
            address: "서울 강남구 테헤란로 152".to_string(),
            address_type,
            bname: bname.to_string(),
            building_name: building_name.to_string(),
        }
    }

    #[test]
    fn road_address_appends_district_and_building() {
        let result = lookup(AddressType::Road, "역삼동", "강남파이낸스센터");

        assert_eq!(
            result.full_address(),
            "서울 강남구 테헤란로 152 (역삼동, 강남파이낸스센터)"
        );
    }

    #[test]
    fn road_address_with_only_building() {
        let result = lookup(AddressType::Road, "", "센터");

        assert_eq!(result.full_address(), "서울 강남구 테헤란로 152 (센터)");
    }

    #[test]
    fn jibun_address_is_left_alone() {
        let result = lookup(AddressType::Jibun, "역삼동", "센터");

        assert_eq!(result.full_address(), "서울 강남구 테헤란로 152");
    }
}
