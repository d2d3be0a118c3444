//! Create Order Use Case
//!
//! Prices come from the catalog, the total is computed here, and the
//! invoice number is drawn from the per-period counter.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::{ProductId, UserId};
use platform::clock::Clock;
use rust_decimal::Decimal;

use crate::application::config::OrderConfig;
use crate::domain::entity::order::{LineItem, Order};
use crate::domain::repository::{InvoiceSequenceRepository, OrderRepository, ProductCatalog};
use crate::domain::value_object::{
    invoice_number::{InvoiceNumber, InvoicePeriod},
    shipping_address::ShippingAddress,
};
use crate::error::{OrderError, OrderResult};

#[derive(Debug, Clone)]
pub struct LineItemInput {
    pub product_id: ProductId,
    /// Signed so that zero and negative input can be reported
    pub quantity: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ShippingAddressInput {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    /// Owner when the request was authenticated, `None` for guests
    pub user_id: Option<UserId>,
    pub items: Vec<LineItemInput>,
    pub shipping_address: Option<ShippingAddressInput>,
    /// Client-computed total, checked against the server total when present
    pub total_amount: Option<Decimal>,
}

pub struct CreateOrderUseCase<O, P>
where
    O: OrderRepository + InvoiceSequenceRepository,
    P: ProductCatalog,
{
    orders: Arc<O>,
    catalog: Arc<P>,
    config: Arc<OrderConfig>,
    clock: Arc<dyn Clock>,
}

impl<O, P> CreateOrderUseCase<O, P>
where
    O: OrderRepository + InvoiceSequenceRepository,
    P: ProductCatalog,
{
    pub fn new(
        orders: Arc<O>,
        catalog: Arc<P>,
        config: Arc<OrderConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            orders,
            catalog,
            config,
            clock,
        }
    }

    pub async fn execute(&self, input: CreateOrderInput) -> OrderResult<Order> {
        let quantities = self.validate_items(&input.items)?;

        let address = input
            .shipping_address
            .ok_or_else(|| OrderError::Validation("Shipping address is required".to_string()))?;
        let shipping_address = ShippingAddress::new(
            &address.street,
            &address.city,
            &address.state,
            &address.postal_code,
            &address.country,
        )?;

        let items = self.price_items(&input.items, &quantities).await?;
        let total = Order::total_of(&items);

        if let Some(provided) = input.total_amount {
            if (provided - total).abs() > self.config.total_tolerance {
                return Err(OrderError::TotalMismatch {
                    expected: total,
                    provided,
                });
            }
        }

        let now = self.clock.now();
        let period = InvoicePeriod::of(now);
        let sequence = self.orders.next_value(period).await?;
        let invoice_number = InvoiceNumber::new(period, sequence);

        let order = Order::place(input.user_id, items, shipping_address, invoice_number, now);
        self.orders.create(&order).await?;

        tracing::info!(
            order_id = %order.order_id,
            invoice_number = %order.invoice_number,
            guest = order.user_id.is_none(),
            total = %order.total_amount,
            "Order created"
        );

        Ok(order)
    }

    /// Bounds on item count and quantities; returns the quantities as `u32`
    fn validate_items(&self, items: &[LineItemInput]) -> OrderResult<Vec<u32>> {
        if items.is_empty() {
            return Err(OrderError::Validation(
                "Order must contain at least one product".to_string(),
            ));
        }

        if items.len() > self.config.max_line_items {
            return Err(OrderError::Validation(format!(
                "Order cannot contain more than {} products",
                self.config.max_line_items
            )));
        }

        items
            .iter()
            .map(|item| {
                if item.quantity < 1 {
                    return Err(OrderError::Validation(
                        "Quantity must be at least 1".to_string(),
                    ));
                }
                u32::try_from(item.quantity)
                    .ok()
                    .filter(|q| *q <= self.config.max_quantity)
                    .ok_or_else(|| {
                        OrderError::Validation(format!(
                            "Quantity cannot exceed {}",
                            self.config.max_quantity
                        ))
                    })
            })
            .collect()
    }

    /// Snapshot the catalog price of every referenced product
    async fn price_items(
        &self,
        items: &[LineItemInput],
        quantities: &[u32],
    ) -> OrderResult<Vec<LineItem>> {
        let mut ids: Vec<ProductId> = items.iter().map(|item| item.product_id).collect();
        ids.sort_by_key(|id| *id.as_uuid());
        ids.dedup();

        let prices: HashMap<ProductId, Decimal> = self
            .catalog
            .find_many(&ids)
            .await?
            .into_iter()
            .map(|product| (product.product_id, product.price))
            .collect();

        items
            .iter()
            .zip(quantities)
            .map(|(item, quantity)| {
                let unit_price = prices
                    .get(&item.product_id)
                    .copied()
                    .ok_or(OrderError::UnknownProduct(item.product_id))?;
                Ok(LineItem {
                    product_id: item.product_id,
                    quantity: *quantity,
                    unit_price,
                })
            })
            .collect()
    }
}
