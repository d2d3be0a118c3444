//! HTTP Handlers

use auth::models::MessageResponse;
use auth::{AuthGate, CurrentUser, UserRepository};
use axum::Extension;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::extract::AppJson;
use kernel::id::{OrderId, ProductId, UserId};
use platform::clock::Clock;
use std::sync::Arc;

use crate::application::config::OrderConfig;
use crate::application::{
    CreateOrderInput, CreateOrderUseCase, LineItemInput, ListOrdersUseCase, ManageProductsUseCase,
    ShippingAddressInput, UpdateOrderUseCase,
};
use crate::domain::entity::product::ProductDraft;
use crate::domain::repository::{InvoiceSequenceRepository, OrderRepository, ProductCatalog};
use crate::domain::value_object::{order_status::OrderStatus, payment_status::PaymentStatus};
use crate::error::{OrderError, OrderResult};
use crate::presentation::dto::{
    CreateOrderRequest, ListOrdersQuery, OrderResponse, ProductRequest, ProductResponse,
    UpdatePaymentStatusRequest, UpdateStatusRequest,
};

/// Shared state for order and catalog handlers
pub struct OrdersAppState<O, P, U> {
    pub orders: Arc<O>,
    pub catalog: Arc<P>,
    /// Resolves bearer tokens against the credential store
    pub gate: AuthGate<U>,
    pub config: Arc<OrderConfig>,
    pub clock: Arc<dyn Clock>,
}

impl<O, P, U> Clone for OrdersAppState<O, P, U> {
    fn clone(&self) -> Self {
        Self {
            orders: self.orders.clone(),
            catalog: self.catalog.clone(),
            gate: self.gate.clone(),
            config: self.config.clone(),
            clock: self.clock.clone(),
        }
    }
}

// ============================================================================
// Orders
// ============================================================================

/// POST /orders
///
/// Owned by the bearer when one is presented, otherwise a guest order.
pub async fn create_order<O, P, U>(
    State(state): State<OrdersAppState<O, P, U>>,
    current: Option<Extension<CurrentUser>>,
    AppJson(req): AppJson<CreateOrderRequest>,
) -> OrderResult<(StatusCode, AppJson<OrderResponse>)>
where
    O: OrderRepository + InvoiceSequenceRepository + Send + Sync + 'static,
    P: ProductCatalog + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let items = req
        .products
        .into_iter()
        .map(|item| {
            let product_id: ProductId = item.product.parse().map_err(|_| {
                OrderError::Validation(format!("Invalid product id: {}", item.product))
            })?;
            Ok(LineItemInput {
                product_id,
                quantity: item.quantity,
            })
        })
        .collect::<OrderResult<Vec<_>>>()?;

    let input = CreateOrderInput {
        user_id: current.map(|Extension(user)| user.user_id),
        items,
        shipping_address: req.shipping_address.map(|a| ShippingAddressInput {
            street: a.street,
            city: a.city,
            state: a.state,
            postal_code: a.postal_code,
            country: a.country,
        }),
        total_amount: req.total_amount,
    };

    let order = CreateOrderUseCase::new(
        state.orders.clone(),
        state.catalog.clone(),
        state.config.clone(),
        state.clock.clone(),
    )
    .execute(input)
    .await?;

    Ok((StatusCode::CREATED, AppJson(OrderResponse::from(&order))))
}

/// GET /orders/mine
pub async fn my_orders<O, P, U>(
    State(state): State<OrdersAppState<O, P, U>>,
    Extension(current): Extension<CurrentUser>,
) -> OrderResult<AppJson<Vec<OrderResponse>>>
where
    O: OrderRepository + InvoiceSequenceRepository + Send + Sync + 'static,
    P: ProductCatalog + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let orders = ListOrdersUseCase::new(state.orders.clone())
        .list(Some(&current.user_id))
        .await?;

    Ok(AppJson(orders.iter().map(OrderResponse::from).collect()))
}

// ============================================================================
// Orders (admin only)
// ============================================================================

/// GET /admin/orders[?userId=]
pub async fn list_orders<O, P, U>(
    State(state): State<OrdersAppState<O, P, U>>,
    Query(query): Query<ListOrdersQuery>,
) -> OrderResult<AppJson<Vec<OrderResponse>>>
where
    O: OrderRepository + InvoiceSequenceRepository + Send + Sync + 'static,
    P: ProductCatalog + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let user_id: Option<UserId> = query
        .user_id
        .as_deref()
        .map(str::parse::<UserId>)
        .transpose()
        .map_err(|_| OrderError::Validation("Invalid user id".to_string()))?;

    let orders = ListOrdersUseCase::new(state.orders.clone())
        .list(user_id.as_ref())
        .await?;

    Ok(AppJson(orders.iter().map(OrderResponse::from).collect()))
}

/// GET /admin/orders/{id}
pub async fn get_order<O, P, U>(
    State(state): State<OrdersAppState<O, P, U>>,
    Path(id): Path<String>,
) -> OrderResult<AppJson<OrderResponse>>
where
    O: OrderRepository + InvoiceSequenceRepository + Send + Sync + 'static,
    P: ProductCatalog + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let order = ListOrdersUseCase::new(state.orders.clone())
        .get(&parse_order_id(&id)?)
        .await?;

    Ok(AppJson(OrderResponse::from(&order)))
}

/// PATCH /admin/orders/{id}/status
pub async fn update_status<O, P, U>(
    State(state): State<OrdersAppState<O, P, U>>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateStatusRequest>,
) -> OrderResult<AppJson<OrderResponse>>
where
    O: OrderRepository + InvoiceSequenceRepository + Send + Sync + 'static,
    P: ProductCatalog + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let order_id = parse_order_id(&id)?;
    let status = OrderStatus::from_code(req.status.trim())
        .ok_or_else(|| OrderError::Validation(format!("Invalid order status: {}", req.status)))?;

    let order = UpdateOrderUseCase::new(state.orders.clone(), state.clock.clone())
        .update_status(&order_id, status)
        .await?;

    tracing::debug!(admin_id = %admin.user_id, order_id = %order.order_id, "Status change by admin");

    Ok(AppJson(OrderResponse::from(&order)))
}

/// PATCH /admin/orders/{id}/payment-status
pub async fn update_payment_status<O, P, U>(
    State(state): State<OrdersAppState<O, P, U>>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdatePaymentStatusRequest>,
) -> OrderResult<AppJson<OrderResponse>>
where
    O: OrderRepository + InvoiceSequenceRepository + Send + Sync + 'static,
    P: ProductCatalog + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let order_id = parse_order_id(&id)?;
    let payment_status = PaymentStatus::from_code(req.payment_status.trim()).ok_or_else(|| {
        OrderError::Validation(format!("Invalid payment status: {}", req.payment_status))
    })?;

    let order = UpdateOrderUseCase::new(state.orders.clone(), state.clock.clone())
        .update_payment_status(&order_id, payment_status)
        .await?;

    tracing::debug!(admin_id = %admin.user_id, order_id = %order.order_id, "Payment status change by admin");

    Ok(AppJson(OrderResponse::from(&order)))
}

// ============================================================================
// Products
// ============================================================================

/// GET /products/{id}
pub async fn get_product<O, P, U>(
    State(state): State<OrdersAppState<O, P, U>>,
    Path(id): Path<String>,
) -> OrderResult<AppJson<ProductResponse>>
where
    O: OrderRepository + InvoiceSequenceRepository + Send + Sync + 'static,
    P: ProductCatalog + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let product_id = parse_product_id(&id)?;

    let product = ManageProductsUseCase::new(state.catalog.clone(), state.clock.clone())
        .get(&product_id)
        .await?;

    Ok(AppJson(ProductResponse::from(&product)))
}

/// GET /products and GET /admin/products
pub async fn list_products<O, P, U>(
    State(state): State<OrdersAppState<O, P, U>>,
) -> OrderResult<AppJson<Vec<ProductResponse>>>
where
    O: OrderRepository + InvoiceSequenceRepository + Send + Sync + 'static,
    P: ProductCatalog + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let products = ManageProductsUseCase::new(state.catalog.clone(), state.clock.clone())
        .list()
        .await?;

    Ok(AppJson(products.iter().map(ProductResponse::from).collect()))
}

/// POST /admin/products
pub async fn create_product<O, P, U>(
    State(state): State<OrdersAppState<O, P, U>>,
    AppJson(req): AppJson<ProductRequest>,
) -> OrderResult<(StatusCode, AppJson<ProductResponse>)>
where
    O: OrderRepository + InvoiceSequenceRepository + Send + Sync + 'static,
    P: ProductCatalog + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let product = ManageProductsUseCase::new(state.catalog.clone(), state.clock.clone())
        .create(product_draft(req))
        .await?;

    Ok((StatusCode::CREATED, AppJson(ProductResponse::from(&product))))
}

/// PUT /admin/products/{id}
pub async fn update_product<O, P, U>(
    State(state): State<OrdersAppState<O, P, U>>,
    Path(id): Path<String>,
    AppJson(req): AppJson<ProductRequest>,
) -> OrderResult<AppJson<ProductResponse>>
where
    O: OrderRepository + InvoiceSequenceRepository + Send + Sync + 'static,
    P: ProductCatalog + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let product_id = parse_product_id(&id)?;

    let product = ManageProductsUseCase::new(state.catalog.clone(), state.clock.clone())
        .update(&product_id, product_draft(req))
        .await?;

    Ok(AppJson(ProductResponse::from(&product)))
}

/// DELETE /admin/products/{id}
pub async fn delete_product<O, P, U>(
    State(state): State<OrdersAppState<O, P, U>>,
    Path(id): Path<String>,
) -> OrderResult<AppJson<MessageResponse>>
where
    O: OrderRepository + InvoiceSequenceRepository + Send + Sync + 'static,
    P: ProductCatalog + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let product_id = parse_product_id(&id)?;

    ManageProductsUseCase::new(state.catalog.clone(), state.clock.clone())
        .delete(&product_id)
        .await?;

    Ok(AppJson(MessageResponse::new("Product deleted")))
}

fn product_draft(req: ProductRequest) -> ProductDraft {
    ProductDraft {
        name: req.name,
        description: req.description,
        price: req.price,
        stock: req.stock,
        category: req.category,
        sizes: req.sizes,
        colors: req.colors,
        image: req.image,
        facets: req.categories.into(),
    }
}

// An id that cannot exist is reported like a missing product
fn parse_product_id(raw: &str) -> OrderResult<ProductId> {
    raw.parse().map_err(|_| OrderError::ProductNotFound)
}

fn parse_order_id(raw: &str) -> OrderResult<OrderId> {
    raw.parse().map_err(|_| OrderError::OrderNotFound)
}
