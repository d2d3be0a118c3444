//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::value_object::{
    email::Email, reset_token::ResetToken, user_password::UserPassword, user_role::UserRole,
};
use crate::error::AuthResult;

/// User (credential store) repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user. A taken email yields `AuthError::DuplicateEmail`.
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Exact, case-sensitive lookup
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn find_by_reset_token(&self, token: &str) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    // Each write below touches only its own columns, so concurrent writers
    // never revert each other's fields.

    /// Stamp `last_login_at`. Errors with `UserNotFound` when the row is gone.
    async fn record_login(&self, user_id: &UserId, at: DateTime<Utc>) -> AuthResult<()>;

    /// Set the block flag and return the stored user as it is after the write
    async fn set_blocked(
        &self,
        user_id: &UserId,
        is_blocked: bool,
        at: DateTime<Utc>,
    ) -> AuthResult<Option<User>>;

    /// Replace the hash and null both reset columns in the same statement
    async fn set_password(
        &self,
        user_id: &UserId,
        password_hash: &UserPassword,
        at: DateTime<Utc>,
    ) -> AuthResult<()>;

    /// Store a reset token, overwriting any pending one
    async fn set_reset_token(
        &self,
        user_id: &UserId,
        token: &ResetToken,
        at: DateTime<Utc>,
    ) -> AuthResult<()>;

    /// Clear the pending reset token, but only while it is still `token`.
    /// Returns whether a row was changed.
    async fn clear_reset_token(
        &self,
        user_id: &UserId,
        token: &str,
        at: DateTime<Utc>,
    ) -> AuthResult<bool>;

    /// Users with the given role, newest first
    async fn list_by_role(&self, role: UserRole) -> AuthResult<Vec<User>>;

    /// Drop reset tokens that expired before `now`; returns how many were cleared
    async fn clear_expired_reset_tokens(&self, now: DateTime<Utc>) -> AuthResult<u64>;
}
