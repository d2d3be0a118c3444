//! Invoice Numbering
//!
//! `INV-{YY}{MM}-{sequence}`: the period comes from the order's creation
//! instant (UTC) and the sequence is a per-period counter starting at 1,
//! zero-padded to four digits. Sequences past 9999 simply grow wider.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Year-month bucket an invoice counter belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvoicePeriod {
    year: i32,
    month: u32,
}

impl InvoicePeriod {
    pub fn of(instant: DateTime<Utc>) -> Self {
        Self {
            year: instant.year(),
            month: instant.month(),
        }
    }

    /// Two-digit year followed by two-digit month, e.g. `2503`
    pub fn code(&self) -> String {
        format!("{:02}{:02}", self.year.rem_euclid(100), self.month)
    }
}

impl fmt::Display for InvoicePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    pub fn new(period: InvoicePeriod, sequence: u64) -> Self {
        Self(format!("INV-{}-{:04}", period.code(), sequence))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
