//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by every feature crate of the storefront back-end:
//! - The unified error type rendered as `{ "message": ... }` JSON bodies
//! - A JSON extractor whose rejections use that same shape
//! - Typed identifiers for users, orders and products
//!
//! Only things whose meaning is identical in every domain belong here.

pub mod error {
    pub mod app_error;
    #[cfg(feature = "axum")]
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
