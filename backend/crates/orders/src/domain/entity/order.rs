//! Order Entity
//!
//! A purchase record. Line items carry the unit price captured when the
//! order was placed; the total is always derived from them.

use chrono::{DateTime, Utc};
use kernel::id::{OrderId, ProductId, UserId};
use rust_decimal::Decimal;

use crate::domain::value_object::{
    invoice_number::InvoiceNumber, order_status::OrderStatus, payment_status::PaymentStatus,
    shipping_address::ShippingAddress,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub product_id: ProductId,
    /// At least 1
    pub quantity: u32,
    /// Catalog price at purchase time
    pub unit_price: Decimal,
}

impl LineItem {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    pub order_id: OrderId,
    /// `None` for guest checkout
    pub user_id: Option<UserId>,
    pub items: Vec<LineItem>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    pub payment_status: PaymentStatus,
    /// Assigned once at creation, never changed
    pub invoice_number: InvoiceNumber,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// New pending, unpaid order with the total computed from `items`
    pub fn place(
        user_id: Option<UserId>,
        items: Vec<LineItem>,
        shipping_address: ShippingAddress,
        invoice_number: InvoiceNumber,
        now: DateTime<Utc>,
    ) -> Self {
        let total_amount = Self::total_of(&items);
        Self {
            order_id: OrderId::new(),
            user_id,
            items,
            total_amount,
            status: OrderStatus::Pending,
            shipping_address,
            payment_status: PaymentStatus::Pending,
            invoice_number,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of unit price × quantity
    pub fn total_of(items: &[LineItem]) -> Decimal {
        items.iter().map(LineItem::subtotal).sum()
    }

    pub fn set_status(&mut self, status: OrderStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }

    pub fn set_payment_status(&mut self, payment_status: PaymentStatus, now: DateTime<Utc>) {
        self.payment_status = payment_status;
        self.updated_at = now;
    }
}
