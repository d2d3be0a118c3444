//! Update Order Use Case
//!
//! Admin overwrites of the lifecycle and payment status.

use std::sync::Arc;

use kernel::id::OrderId;
use platform::clock::Clock;

use crate::domain::entity::order::Order;
use crate::domain::repository::OrderRepository;
use crate::domain::value_object::{order_status::OrderStatus, payment_status::PaymentStatus};
use crate::error::{OrderError, OrderResult};

pub struct UpdateOrderUseCase<O>
where
    O: OrderRepository,
{
    orders: Arc<O>,
    clock: Arc<dyn Clock>,
}

impl<O> UpdateOrderUseCase<O>
where
    O: OrderRepository,
{
    pub fn new(orders: Arc<O>, clock: Arc<dyn Clock>) -> Self {
        Self { orders, clock }
    }

    /// Set any status, regardless of the current one
    pub async fn update_status(&self, order_id: &OrderId, status: OrderStatus) -> OrderResult<Order> {
        let order = self
            .orders
            .update_status(order_id, status, self.clock.now())
            .await?
            .ok_or(OrderError::OrderNotFound)?;

        tracing::info!(order_id = %order.order_id, status = %status, "Order status updated");

        Ok(order)
    }

    pub async fn update_payment_status(
        &self,
        order_id: &OrderId,
        payment_status: PaymentStatus,
    ) -> OrderResult<Order> {
        let order = self
            .orders
            .update_payment_status(order_id, payment_status, self.clock.now())
            .await?
            .ok_or(OrderError::OrderNotFound)?;

        tracing::info!(
            order_id = %order.order_id,
            payment_status = %payment_status,
            "Order payment status updated"
        );

        Ok(order)
    }
}
