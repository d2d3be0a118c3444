//! Product Entity
//!
//! Minimal catalog record the order ledger reads prices from.

use chrono::{DateTime, Utc};
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::ProductId;
use rust_decimal::Decimal;

use crate::domain::value_object::product_category::ProductCategory;

/// Optional classification lists used by catalog filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFacets {
    pub style: Vec<String>,
    pub fabric: Vec<String>,
    pub occasion: Vec<String>,
    pub kind: Vec<String>,
}

/// Unvalidated product fields
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i64,
    pub category: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub image: Option<String>,
    pub facets: ProductFacets,
}

#[derive(Debug, Clone)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    /// Strictly positive
    pub price: Decimal,
    pub stock: i32,
    pub category: ProductCategory,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub image: Option<String>,
    pub facets: ProductFacets,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(draft: ProductDraft, now: DateTime<Utc>) -> AppResult<Self> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(AppError::bad_request("Product name is required"));
        }

        let description = draft.description.trim();
        if description.is_empty() {
            return Err(AppError::bad_request("Product description is required"));
        }

        if draft.price <= Decimal::ZERO {
            return Err(AppError::bad_request("Price must be greater than 0"));
        }

        let stock = i32::try_from(draft.stock)
            .ok()
            .filter(|s| *s >= 0)
            .ok_or_else(|| AppError::bad_request("Stock must be a non-negative integer"))?;

        let category = ProductCategory::from_code(draft.category.trim()).ok_or_else(|| {
            AppError::bad_request(format!("{} is not a valid category", draft.category))
        })?;

        let image = draft
            .image
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty());

        Ok(Self {
            product_id: ProductId::new(),
            name: name.to_string(),
            description: description.to_string(),
            price: draft.price.round_dp(2),
            stock,
            category,
            sizes: draft.sizes,
            colors: draft.colors,
            image,
            facets: draft.facets,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace every editable field, keeping identity and creation time
    pub fn revise(&self, draft: ProductDraft, now: DateTime<Utc>) -> AppResult<Self> {
        let mut revised = Self::new(draft, now)?;
        revised.product_id = self.product_id;
        revised.created_at = self.created_at;
        Ok(revised)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Robe Lin".to_string(),
            description: "Robe d'été en lin".to_string(),
            price: Decimal::new(4990, 2),
            stock: 12,
            category: "robes".to_string(),
            sizes: vec!["S".to_string(), "M".to_string()],
            colors: vec!["blanc".to_string()],
            image: Some("  ".to_string()),
            facets: ProductFacets::default(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_product() {
        let product = Product::new(draft(), now()).unwrap();
        assert_eq!(product.category, ProductCategory::Robes);
        assert_eq!(product.stock, 12);
        assert!(product.image.is_none());
    }

    #[test]
    fn test_invalid_products() {
        let mut zero_price = draft();
        zero_price.price = Decimal::ZERO;
        assert!(Product::new(zero_price, now()).is_err());

        let mut negative_stock = draft();
        negative_stock.stock = -1;
        assert!(Product::new(negative_stock, now()).is_err());

        let mut bad_category = draft();
        bad_category.category = "chaussures".to_string();
        let err = Product::new(bad_category, now()).unwrap_err();
        assert_eq!(err.message(), "chaussures is not a valid category");

        let mut blank_name = draft();
        blank_name.name = "  ".to_string();
        assert!(Product::new(blank_name, now()).is_err());
    }

    #[test]
    fn test_revise_keeps_identity() {
        let product = Product::new(draft(), now()).unwrap();
        let later = now() + chrono::Duration::days(2);

        let mut changes = draft();
        changes.price = Decimal::new(3990, 2);
        changes.stock = 0;
        let revised = product.revise(changes, later).unwrap();

        assert_eq!(revised.product_id, product.product_id);
        assert_eq!(revised.created_at, product.created_at);
        assert_eq!(revised.updated_at, later);
        assert_eq!(revised.price, Decimal::new(3990, 2));
        assert_eq!(revised.stock, 0);

        let mut invalid = draft();
        invalid.price = Decimal::ZERO;
        assert!(product.revise(invalid, later).is_err());
    }
}
