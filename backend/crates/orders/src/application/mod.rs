//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod create_order;
pub mod list_orders;
pub mod manage_products;
pub mod update_order;

// Re-exports
pub use config::OrderConfig;
pub use create_order::{CreateOrderInput, CreateOrderUseCase, LineItemInput, ShippingAddressInput};
pub use list_orders::ListOrdersUseCase;
pub use manage_products::ManageProductsUseCase;
pub use update_order::UpdateOrderUseCase;
