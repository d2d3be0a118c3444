//! API Composition
//!
//! Builds the full HTTP surface from the feature crates. The binary picks
//! the storage backend; everything here is generic over the repository
//! traits so the same router runs on PostgreSQL and in memory.

pub mod config;


use std::sync::Arc;

use auth::{
    AuthAppState, AuthConfig, AuthGate, NotificationDispatcher, UserRepository, auth_router,
    customers_admin_router,
};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use orders::{
    InvoiceSequenceRepository, OrderConfig, OrderRepository, OrdersAppState, ProductCatalog,
    admin_orders_router, admin_products_router, orders_router, products_router,
};
use platform::clock::Clock;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

/// Storage and delivery backends for one running server
pub struct Backends<U, N, O, P> {
    pub users: Arc<U>,
    pub notifier: Arc<N>,
    pub orders: Arc<O>,
    pub catalog: Arc<P>,
}

/// Compose every feature router under its mount point
pub fn app<U, N, O, P>(
    backends: Backends<U, N, O, P>,
    auth_config: Arc<AuthConfig>,
    order_config: Arc<OrderConfig>,
    clock: Arc<dyn Clock>,
) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    N: NotificationDispatcher + Send + Sync + 'static,
    O: OrderRepository + InvoiceSequenceRepository + Send + Sync + 'static,
    P: ProductCatalog + Send + Sync + 'static,
{
    let auth_state = AuthAppState {
        repo: backends.users.clone(),
        notifier: backends.notifier,
        config: auth_config.clone(),
        clock: clock.clone(),
    };

    let orders_state = OrdersAppState {
        orders: backends.orders,
        catalog: backends.catalog,
        gate: AuthGate::new(backends.users, auth_config, clock.clone()),
        config: order_config,
        clock,
    };

    Router::new()
        .nest("/auth", auth_router(auth_state.clone()))
        .nest("/admin/customers", customers_admin_router(auth_state))
        .nest("/orders", orders_router(orders_state.clone()))
        .nest("/admin/orders", admin_orders_router(orders_state.clone()))
        .nest("/products", products_router(orders_state.clone()))
        .nest("/admin/products", admin_products_router(orders_state))
}

/// CORS for the storefront and admin front-ends
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}

/// Drop reset tokens that expired while the server was down.
///
/// Failures are logged and never stop startup.
pub async fn clear_expired_reset_tokens<U>(users: &U, clock: &dyn Clock)
where
    U: UserRepository + Send + Sync,
{
    match users.clear_expired_reset_tokens(clock.now()).await {
        Ok(cleared) => {
            tracing::info!(tokens_cleared = cleared, "Reset token cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Reset token cleanup failed, continuing anyway");
        }
    }
}
