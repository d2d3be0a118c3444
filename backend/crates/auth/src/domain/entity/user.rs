//! User Entity
//!
//! Identity record: credentials, role, block flag and the pending reset token.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email, person_name::PersonName, reset_token::ResetToken, user_password::UserPassword,
    user_role::UserRole,
};

/// User entity
///
/// `password_hash` never holds clear text. `reset_token` bundles the token
/// with its expiry so the two are present or absent together.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, case-sensitive login key
    pub email: Email,
    pub password_hash: UserPassword,
    pub role: UserRole,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub is_blocked: bool,
    pub reset_token: Option<ResetToken>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, unblocked user
    pub fn new(
        email: Email,
        password_hash: UserPassword,
        role: UserRole,
        first_name: PersonName,
        last_name: PersonName,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            role,
            first_name,
            last_name,
            is_blocked: false,
            reset_token: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record successful login
    pub fn record_login(&mut self, now: DateTime<Utc>) {
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    pub fn can_login(&self) -> bool {
        !self.is_blocked
    }

    /// Replace any outstanding reset token
    pub fn issue_reset(&mut self, token: ResetToken, now: DateTime<Utc>) {
        self.reset_token = Some(token);
        self.updated_at = now;
    }

    pub fn clear_reset(&mut self, now: DateTime<Utc>) {
        self.reset_token = None;
        self.updated_at = now;
    }

    /// Overwrite the hash; a pending reset token is cleared with it
    pub fn set_password(&mut self, password_hash: UserPassword, now: DateTime<Utc>) {
        self.password_hash = password_hash;
        self.reset_token = None;
        self.updated_at = now;
    }

    pub fn set_blocked(&mut self, is_blocked: bool, now: DateTime<Utc>) {
        self.is_blocked = is_blocked;
        self.updated_at = now;
    }
}
