//! Order and Catalog Routers

use auth::{UserRepository, optional_auth, require_admin, require_auth};
use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::domain::repository::{InvoiceSequenceRepository, OrderRepository, ProductCatalog};
use crate::presentation::handlers::{self, OrdersAppState};

/// Customer order routes, mounted under `/orders`
pub fn orders_router<O, P, U>(state: OrdersAppState<O, P, U>) -> Router
where
    O: OrderRepository + InvoiceSequenceRepository + Send + Sync + 'static,
    P: ProductCatalog + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let gate = state.gate.clone();

    Router::new()
        .route(
            "/",
            post(handlers::create_order::<O, P, U>).route_layer(middleware::from_fn_with_state(
                gate.clone(),
                optional_auth::<U>,
            )),
        )
        .route(
            "/mine",
            get(handlers::my_orders::<O, P, U>)
                .route_layer(middleware::from_fn_with_state(gate, require_auth::<U>)),
        )
        .with_state(state)
}

/// Admin order management, mounted under `/admin/orders`
pub fn admin_orders_router<O, P, U>(state: OrdersAppState<O, P, U>) -> Router
where
    O: OrderRepository + InvoiceSequenceRepository + Send + Sync + 'static,
    P: ProductCatalog + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let gate = state.gate.clone();

    Router::new()
        .route("/", get(handlers::list_orders::<O, P, U>))
        .route("/{id}", get(handlers::get_order::<O, P, U>))
        .route("/{id}/status", patch(handlers::update_status::<O, P, U>))
        .route(
            "/{id}/payment-status",
            patch(handlers::update_payment_status::<O, P, U>),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(gate, require_auth::<U>))
        .with_state(state)
}

/// Public catalog reads, mounted under `/products`
pub fn products_router<O, P, U>(state: OrdersAppState<O, P, U>) -> Router
where
    O: OrderRepository + InvoiceSequenceRepository + Send + Sync + 'static,
    P: ProductCatalog + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::list_products::<O, P, U>))
        .route("/{id}", get(handlers::get_product::<O, P, U>))
        .with_state(state)
}

/// Admin catalog management, mounted under `/admin/products`
pub fn admin_products_router<O, P, U>(state: OrdersAppState<O, P, U>) -> Router
where
    O: OrderRepository + InvoiceSequenceRepository + Send + Sync + 'static,
    P: ProductCatalog + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let gate = state.gate.clone();

    Router::new()
        .route(
            "/",
            get(handlers::list_products::<O, P, U>).post(handlers::create_product::<O, P, U>),
        )
        .route(
            "/{id}",
            put(handlers::update_product::<O, P, U>).delete(handlers::delete_product::<O, P, U>),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(gate, require_auth::<U>))
        .with_state(state)
}
