//! Session Token Issuer
//!
//! Stateless bearer tokens: `base64url(claims_json) "." base64url(hmac_sha256(payload))`.
//! The MAC covers the encoded payload. Tokens are not revocable before expiry.

use std::sync::Arc;

use chrono::Duration;
use kernel::id::UserId;
use platform::clock::Clock;
use platform::crypto::{from_base64url, hmac_sha256, hmac_sha256_verify, to_base64url};

use crate::application::config::AuthConfig;
use crate::domain::entity::{session_claims::SessionClaims, user::User};
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

#[derive(Clone)]
pub struct SessionTokenIssuer {
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl SessionTokenIssuer {
    pub fn new(config: Arc<AuthConfig>, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    /// Sign a token for `subject` valid for `ttl`
    pub fn issue(
        &self,
        subject: UserId,
        role: UserRole,
        email: &Email,
        ttl: Duration,
    ) -> AuthResult<String> {
        let now = self.clock.now().timestamp();
        let claims = SessionClaims {
            sub: subject,
            role,
            email: email.as_str().to_string(),
            iat: now,
            exp: now + ttl.num_seconds(),
        };

        let json = serde_json::to_vec(&claims)
            .map_err(|e| AuthError::Internal(format!("Failed to encode claims: {e}")))?;
        let payload = to_base64url(&json);

        let signature = hmac_sha256(&self.config.token_secret, payload.as_bytes())
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))?;

        Ok(format!("{}.{}", payload, to_base64url(&signature)))
    }

    /// Sign a token for a user with the configured session lifetime
    pub fn issue_for(&self, user: &User) -> AuthResult<String> {
        let ttl = Duration::from_std(self.config.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;
        self.issue(user.user_id, user.role, &user.email, ttl)
    }

    /// Check signature (current key, then retired keys) and expiry
    pub fn verify(&self, token: &str) -> AuthResult<SessionClaims> {
        let (payload, signature_b64) = token.split_once('.').ok_or(AuthError::SessionInvalid)?;
        let signature = from_base64url(signature_b64).map_err(|_| AuthError::SessionInvalid)?;

        let signed_by_known_key = std::iter::once(&self.config.token_secret)
            .chain(self.config.previous_token_secrets.iter())
            .any(|key| hmac_sha256_verify(key, payload.as_bytes(), &signature));

        if !signed_by_known_key {
            return Err(AuthError::SessionInvalid);
        }

        let json = from_base64url(payload).map_err(|_| AuthError::SessionInvalid)?;
        let claims: SessionClaims =
            serde_json::from_slice(&json).map_err(|_| AuthError::SessionInvalid)?;

        if claims.is_expired_at(self.clock.now().timestamp()) {
            return Err(AuthError::SessionExpired);
        }

        Ok(claims)
    }
}
