//! Person Name Value Object
//!
//! First and last names are free text; only blank and oversized input is rejected.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const PERSON_NAME_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// `field` names the input in error messages ("First name", "Last name").
    pub fn new(raw: impl AsRef<str>, field: &'static str) -> AppResult<Self> {
        let value = raw.as_ref().trim();

        if value.is_empty() {
            return Err(AppError::bad_request(format!("{field} is required")));
        }

        if value.chars().count() > PERSON_NAME_MAX_CHARS {
            return Err(AppError::bad_request(format!(
                "{field} must be at most {PERSON_NAME_MAX_CHARS} characters"
            )));
        }

        if value.chars().any(char::is_control) {
            return Err(AppError::bad_request(format!(
                "{field} contains invalid characters"
            )));
        }

        Ok(Self(value.to_string()))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
