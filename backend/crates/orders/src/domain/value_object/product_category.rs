//! Product Category
//!
//! Closed set of catalog categories. Codes are stored and sent as-is.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Robes,
    Pantalons,
    Accessoires,
}

impl ProductCategory {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            ProductCategory::Robes => "robes",
            ProductCategory::Pantalons => "pantalons",
            ProductCategory::Accessoires => "accessoires",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "robes" => Some(ProductCategory::Robes),
            "pantalons" => Some(ProductCategory::Pantalons),
            "accessoires" => Some(ProductCategory::Accessoires),
            _ => None,
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_codes() {
        assert_eq!(ProductCategory::from_code("robes"), Some(ProductCategory::Robes));
        assert_eq!(ProductCategory::from_code("accessoires"), Some(ProductCategory::Accessoires));
        assert_eq!(ProductCategory::from_code("shoes"), None);
        assert_eq!(ProductCategory::Pantalons.to_string(), "pantalons");
    }
}
