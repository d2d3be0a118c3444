//! Value Object Module

pub mod invoice_number;
pub mod order_status;
pub mod payment_status;
pub mod product_category;
pub mod shipping_address;
