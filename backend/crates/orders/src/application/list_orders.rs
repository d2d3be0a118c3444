//! List Orders Use Case

use std::sync::Arc;

use kernel::id::{OrderId, UserId};

use crate::domain::entity::order::Order;
use crate::domain::repository::OrderRepository;
use crate::error::{OrderError, OrderResult};

pub struct ListOrdersUseCase<O>
where
    O: OrderRepository,
{
    orders: Arc<O>,
}

impl<O> ListOrdersUseCase<O>
where
    O: OrderRepository,
{
    pub fn new(orders: Arc<O>) -> Self {
        Self { orders }
    }

    /// Newest first; `user_id` restricts the result to one owner
    pub async fn list(&self, user_id: Option<&UserId>) -> OrderResult<Vec<Order>> {
        self.orders.list(user_id).await
    }

    pub async fn get(&self, order_id: &OrderId) -> OrderResult<Order> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound)
    }
}
