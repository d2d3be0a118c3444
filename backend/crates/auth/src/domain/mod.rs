//! Domain Layer
//!
//! Contains entities, value objects, and the persistence / delivery seams.

pub mod entity;
pub mod notification;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{session_claims::SessionClaims, user::User};
pub use notification::{Notification, NotificationDispatcher, NotificationError};
pub use repository::UserRepository;
