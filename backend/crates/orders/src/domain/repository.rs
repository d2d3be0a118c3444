//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::{OrderId, ProductId, UserId};

use crate::domain::entity::{order::Order, product::Product};
use crate::domain::value_object::{
    invoice_number::InvoicePeriod, order_status::OrderStatus, payment_status::PaymentStatus,
};
use crate::error::OrderResult;

/// Order ledger repository trait
#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    /// Insert the order with all of its line items
    async fn create(&self, order: &Order) -> OrderResult<()>;

    async fn find_by_id(&self, order_id: &OrderId) -> OrderResult<Option<Order>>;

    /// Orders newest first, optionally restricted to one owner
    async fn list(&self, user_id: Option<&UserId>) -> OrderResult<Vec<Order>>;

    /// Write only `status` and `updated_at`; returns the order after the write
    async fn update_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
        at: DateTime<Utc>,
    ) -> OrderResult<Option<Order>>;

    /// Write only `payment_status` and `updated_at`; returns the order after the write
    async fn update_payment_status(
        &self,
        order_id: &OrderId,
        payment_status: PaymentStatus,
        at: DateTime<Utc>,
    ) -> OrderResult<Option<Order>>;
}

/// Per-period invoice counter
#[trait_variant::make(InvoiceSequenceRepository: Send)]
pub trait LocalInvoiceSequenceRepository {
    /// Atomically increment the period's counter and return the new value.
    /// The first call for a period returns 1.
    async fn next_value(&self, period: InvoicePeriod) -> OrderResult<u64>;
}

/// Product catalog trait
#[trait_variant::make(ProductCatalog: Send)]
pub trait LocalProductCatalog {
    async fn create(&self, product: &Product) -> OrderResult<()>;

    async fn find_by_id(&self, product_id: &ProductId) -> OrderResult<Option<Product>>;

    /// Products whose id is in `product_ids`; unknown ids are simply absent
    async fn find_many(&self, product_ids: &[ProductId]) -> OrderResult<Vec<Product>>;

    /// Every product, newest first
    async fn list(&self) -> OrderResult<Vec<Product>>;

    /// Overwrite the editable columns; `false` when no such product exists
    async fn update(&self, product: &Product) -> OrderResult<bool>;

    /// `false` when no such product exists. A product still referenced by
    /// an order is refused with `ProductInUse`.
    async fn delete(&self, product_id: &ProductId) -> OrderResult<bool>;
}
