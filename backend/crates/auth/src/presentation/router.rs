//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::domain::notification::NotificationDispatcher;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthGate, require_admin, require_auth};

/// Public authentication routes, mounted under `/auth`
pub fn auth_router<R, N>(state: AuthAppState<R, N>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    N: NotificationDispatcher + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<R, N>))
        .route("/register-admin", post(handlers::register_admin::<R, N>))
        .route("/login", post(handlers::login::<R, N>))
        .route("/verify", get(handlers::verify::<R, N>))
        .route("/forgot-password", post(handlers::forgot_password::<R, N>))
        .route("/reset-password/{token}", post(handlers::reset_password::<R, N>))
        .with_state(state)
}

/// Admin customer management, mounted under `/admin/customers`
pub fn customers_admin_router<R, N>(state: AuthAppState<R, N>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    N: NotificationDispatcher + Send + Sync + 'static,
{
    let gate = AuthGate::new(state.repo.clone(), state.config.clone(), state.clock.clone());

    Router::new()
        .route("/", get(handlers::list_customers::<R, N>))
        .route("/{id}/block", patch(handlers::set_customer_blocked::<R, N>))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(gate, require_auth::<R>))
        .with_state(state)
}
