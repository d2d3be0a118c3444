//! Application Configuration
//!
//! Limits applied when orders are placed.

use rust_decimal::Decimal;

/// Orders application configuration
#[derive(Debug, Clone)]
pub struct OrderConfig {
    /// Largest accepted difference between a client total and the computed one
    pub total_tolerance: Decimal,
    pub max_line_items: usize,
    pub max_quantity: u32,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            total_tolerance: Decimal::new(1, 2),
            max_line_items: 100,
            max_quantity: 1000,
        }
    }
}
