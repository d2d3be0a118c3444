//! Session Claims
//!
//! Payload carried inside a signed session token.

use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_role::UserRole;

/// Claims encoded into a session token. Timestamps are Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user id)
    pub sub: UserId,
    pub role: UserRole,
    pub email: String,
    /// Issued at
    pub iat: i64,
    /// Expires at
    pub exp: i64,
}

impl SessionClaims {
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        now_secs > self.exp
    }
}
