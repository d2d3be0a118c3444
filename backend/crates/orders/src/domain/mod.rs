//! Domain Layer
//!
//! Order ledger entities, value objects and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::order::{LineItem, Order};
pub use entity::product::{Product, ProductDraft, ProductFacets};
pub use repository::{InvoiceSequenceRepository, OrderRepository, ProductCatalog};
