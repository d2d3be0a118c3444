//! Password Reset Token
//!
//! A single-use credential: 32 bytes from the OS CSPRNG, hex-encoded
//! (256 bits of entropy), paired with its expiry. The pair is stored as one
//! optional value on the user so the two fields are always set together.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// Random bytes per token
pub const RESET_TOKEN_BYTES: usize = 32;

#[derive(Clone, PartialEq, Eq)]
pub struct ResetToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl ResetToken {
    /// Mint a fresh token valid for `ttl` from `now`.
    pub fn issue(now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            value: platform::crypto::random_token_hex(RESET_TOKEN_BYTES),
            expires_at: now + ttl,
        }
    }

    pub fn from_db(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Expired strictly after the expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Constant-time comparison against a presented token.
    pub fn matches(&self, presented: &str) -> bool {
        platform::crypto::constant_time_eq(self.value.as_bytes(), presented.as_bytes())
    }
}

impl fmt::Debug for ResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
