//! Product categories chosen in the admin forms

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main (top level) product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MainCategory {
    /// `상의`
    #[serde(rename = "상의")]
    Tops,

    /// `하의`
    #[serde(rename = "하의")]
    Bottoms,
}

impl MainCategory {
    /// Stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tops => "상의",
            Self::Bottoms => "하의",
        }
    }

    /// Sub categories offered once this main category is chosen.
    #[must_use]
    pub const fn sub_categories(self) -> &'static [SubCategory] {
        match self {
            Self::Tops => &[SubCategory::TShirt, SubCategory::Shirt],
            Self::Bottoms => &[SubCategory::Jeans, SubCategory::Slacks],
        }
    }
}

/// Sub category, always owned by one main category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubCategory {
    /// `티셔츠`
    #[serde(rename = "티셔츠")]
    TShirt,

    /// `셔츠`
    #[serde(rename = "셔츠")]
    Shirt,

    /// `청바지`
    #[serde(rename = "청바지")]
    Jeans,

    /// `슬랙스`
    #[serde(rename = "슬랙스")]
    Slacks,
}

impl SubCategory {
    /// Stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TShirt => "티셔츠",
            Self::Shirt => "셔츠",
            Self::Jeans => "청바지",
            Self::Slacks => "슬랙스",
        }
    }

    /// Owning main category.
    #[must_use]
    pub const fn main(self) -> MainCategory {
        match self {
            Self::TShirt | Self::Shirt => MainCategory::Tops,
            Self::Jeans | Self::Slacks => MainCategory::Bottoms,
        }
    }
}

impl Display for MainCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl Display for SubCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Value that names no known category.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown product category: {0}")]
pub struct UnknownProductCategory(pub String);

impl FromStr for MainCategory {
    type Err = UnknownProductCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "상의" => Ok(Self::Tops),
            "하의" => Ok(Self::Bottoms),
            other => Err(UnknownProductCategory(other.to_string())),
        }
    }
}

impl FromStr for SubCategory {
    type Err = UnknownProductCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "티셔츠" => Ok(Self::TShirt),
            "셔츠" => Ok(Self::Shirt),
            "청바지" => Ok(Self::Jeans),
            "슬랙스" => Ok(Self::Slacks),
            other => Err(UnknownProductCategory(other.to_string())),
        }
    }
}
