//! In-Memory Implementations
//!
//! Process-local order ledger and catalog for tests and database-less
//! debug runs.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{OrderId, ProductId, UserId};
use tokio::sync::{Mutex, RwLock};

use crate::domain::entity::{order::Order, product::Product};
use crate::domain::repository::{InvoiceSequenceRepository, OrderRepository, ProductCatalog};
use crate::domain::value_object::{
    invoice_number::InvoicePeriod, order_status::OrderStatus, payment_status::PaymentStatus,
};
use crate::error::{OrderError, OrderResult};

/// Orders plus their invoice counters. Clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
    sequences: Arc<Mutex<HashMap<String, u64>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: &Order) -> OrderResult<()> {
        let mut orders = self.orders.write().await;

        if orders
            .values()
            .any(|o| o.invoice_number == order.invoice_number)
        {
            return Err(OrderError::Internal(format!(
                "Duplicate invoice number {}",
                order.invoice_number
            )));
        }

        orders.insert(order.order_id, order.clone());
        Ok(())
    }

    async fn find_by_id(&self, order_id: &OrderId) -> OrderResult<Option<Order>> {
        Ok(self.orders.read().await.get(order_id).cloned())
    }

    async fn list(&self, user_id: Option<&UserId>) -> OrderResult<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut matching: Vec<Order> = orders
            .values()
            .filter(|o| user_id.is_none_or(|id| o.user_id.as_ref() == Some(id)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn update_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
        at: DateTime<Utc>,
    ) -> OrderResult<Option<Order>> {
        let mut orders = self.orders.write().await;
        Ok(orders.get_mut(order_id).map(|stored| {
            stored.set_status(status, at);
            stored.clone()
        }))
    }

    async fn update_payment_status(
        &self,
        order_id: &OrderId,
        payment_status: PaymentStatus,
        at: DateTime<Utc>,
    ) -> OrderResult<Option<Order>> {
        let mut orders = self.orders.write().await;
        Ok(orders.get_mut(order_id).map(|stored| {
            stored.set_payment_status(payment_status, at);
            stored.clone()
        }))
    }
}

impl InvoiceSequenceRepository for InMemoryOrderRepository {
    async fn next_value(&self, period: InvoicePeriod) -> OrderResult<u64> {
        // Increment under one lock so concurrent callers never share a value
        let mut sequences = self.sequences.lock().await;
        let value = sequences.entry(period.code()).or_insert(0);
        *value += 1;
        Ok(*value)
    }
}

/// In-memory product catalog
#[derive(Clone, Default)]
pub struct InMemoryProductCatalog {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductCatalog for InMemoryProductCatalog {
    async fn create(&self, product: &Product) -> OrderResult<()> {
        self.products
            .write()
            .await
            .insert(product.product_id, product.clone());
        Ok(())
    }

    async fn find_by_id(&self, product_id: &ProductId) -> OrderResult<Option<Product>> {
        Ok(self.products.read().await.get(product_id).cloned())
    }

    async fn find_many(&self, product_ids: &[ProductId]) -> OrderResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(product_ids
            .iter()
            .filter_map(|id| products.get(id).cloned())
            .collect())
    }

    async fn list(&self) -> OrderResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn update(&self, product: &Product) -> OrderResult<bool> {
        let mut products = self.products.write().await;
        match products.get_mut(&product.product_id) {
            Some(stored) => {
                *stored = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // Orders live in a separate store here, so references are not checked
    async fn delete(&self, product_id: &ProductId) -> OrderResult<bool> {
        Ok(self.products.write().await.remove(product_id).is_some())
    }
}
