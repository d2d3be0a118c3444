//! Orders Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Order and product entities, value objects, repository traits
//! - `application/` - Use cases and limits
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs and routers
//!
//! ## Features
//! - Order placement for guests and signed-in customers
//! - Line prices and totals taken from the catalog, never from the client
//! - Monthly invoice numbering `INV-YYMM-NNNN` backed by an atomic counter
//! - Admin order listing and status/payment updates
//! - Admin catalog management and public product lookup

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::OrderConfig;
pub use domain::repository::{InvoiceSequenceRepository, OrderRepository, ProductCatalog};
pub use error::{OrderError, OrderResult};
pub use infra::memory::{InMemoryOrderRepository, InMemoryProductCatalog};
pub use infra::postgres::{PgOrderRepository, PgProductCatalog};
pub use presentation::handlers::OrdersAppState;
pub use presentation::router::{
    admin_orders_router, admin_products_router, orders_router, products_router,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
