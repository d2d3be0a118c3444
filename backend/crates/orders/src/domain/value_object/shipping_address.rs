//! Shipping Address
//!
//! Free-text destination. Every part is required; values are trimmed.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const ADDRESS_PART_MAX_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl ShippingAddress {
    pub fn new(
        street: &str,
        city: &str,
        state: &str,
        postal_code: &str,
        country: &str,
    ) -> AppResult<Self> {
        Ok(Self {
            street: part(street, "street")?,
            city: part(city, "city")?,
            state: part(state, "state")?,
            postal_code: part(postal_code, "postal code")?,
            country: part(country, "country")?,
        })
    }
}

fn part(raw: &str, field: &str) -> AppResult<String> {
    let value = raw.trim();

    if value.is_empty() {
        return Err(AppError::bad_request(format!(
            "Shipping address is incomplete: {field} is required"
        )));
    }

    if value.chars().count() > ADDRESS_PART_MAX_CHARS {
        return Err(AppError::bad_request(format!(
            "Shipping address {field} must be at most {ADDRESS_PART_MAX_CHARS} characters"
        )));
    }

    Ok(value.to_string())
}
