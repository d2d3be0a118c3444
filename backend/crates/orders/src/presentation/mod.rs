//! Presentation Layer
//!
//! HTTP handlers, DTOs and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::OrdersAppState;
pub use router::{admin_orders_router, admin_products_router, orders_router, products_router};
