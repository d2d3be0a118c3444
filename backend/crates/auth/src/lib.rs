//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and notifier traits
//! - `application/` - Use cases and application services
//! - `infra/` - PostgreSQL, in-memory and mail implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration (customer, and admin behind a shared secret)
//! - Email + password login returning a signed bearer token
//! - Password reset by single-use, time-limited token sent by mail
//! - Admin-only customer listing and blocking
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, NFKC-normalized, optional pepper
//! - Session tokens are HMAC-SHA256 signed claims; previous keys are
//!   accepted for verification so the signing key can be rotated
//! - Unknown email and wrong password are reported identically on login
//! - The gate re-reads the user on every request, so roles come from storage

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::check_session::CurrentUser;
pub use domain::notification::{Notification, NotificationDispatcher, NotificationError};
pub use domain::repository::UserRepository;
pub use error::{AuthError, AuthResult};
pub use infra::mailer::{MailNotifier, SmtpSettings};
pub use infra::memory::{InMemoryNotifier, InMemoryUserRepository};
pub use infra::postgres::PgUserRepository;
pub use presentation::handlers::AuthAppState;
pub use presentation::middleware::{AuthGate, optional_auth, require_admin, require_auth};
pub use presentation::router::{auth_router, customers_admin_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
