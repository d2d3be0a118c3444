//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Default lifetime of a session token
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(3600);

/// Default lifetime of a password reset token
pub const DEFAULT_RESET_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC key used to sign new session tokens
    pub token_secret: Vec<u8>,
    /// Retired keys still accepted when verifying (rotation window)
    pub previous_token_secrets: Vec<Vec<u8>>,
    pub session_ttl: Duration,
    pub reset_token_ttl: Duration,
    /// Shared secret for admin registration; `None` disables the route
    pub admin_secret: Option<String>,
    /// Prefix of the link mailed for password resets; the token is appended
    pub reset_link_base: String,
    /// Echo the reset link in the API response (development only)
    pub expose_reset_link: bool,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: platform::crypto::random_bytes(32),
            previous_token_secrets: Vec::new(),
            session_ttl: DEFAULT_SESSION_TTL,
            reset_token_ttl: DEFAULT_RESET_TOKEN_TTL,
            admin_secret: None,
            reset_link_base: "http://localhost:3000/reset-password".to_string(),
            expose_reset_link: false,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a fixed signing key
    pub fn with_secret(token_secret: Vec<u8>) -> Self {
        Self {
            token_secret,
            ..Default::default()
        }
    }

    /// Create config for development (random key, reset link echoed)
    pub fn development() -> Self {
        Self {
            expose_reset_link: true,
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Build the link mailed to the user for a given reset token
    pub fn reset_link(&self, token: &str) -> String {
        format!("{}/{}", self.reset_link_base.trim_end_matches('/'), token)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("previous_token_secrets", &self.previous_token_secrets.len())
            .field("session_ttl", &self.session_ttl)
            .field("reset_token_ttl", &self.reset_token_ttl)
            .field("admin_secret", &self.admin_secret.as_ref().map(|_| "[REDACTED]"))
            .field("reset_link_base", &self.reset_link_base)
            .field("expose_reset_link", &self.expose_reset_link)
            .finish_non_exhaustive()
    }
}
