//! Password Reset Use Case
//!
//! Per-user states: no reset pending, or one reset pending. A new request
//! overwrites the pending token; consuming it (or finding it expired) clears it.

use std::sync::Arc;

use chrono::Duration;
use platform::clock::Clock;

use crate::application::config::AuthConfig;
use crate::application::set_password::SetPasswordUseCase;
use crate::domain::notification::{Notification, NotificationDispatcher};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, reset_token::ResetToken};
use crate::error::{AuthError, AuthResult};

/// Result of a reset request
pub struct ResetRequestOutput {
    /// Link that was mailed; only surfaced to clients in development
    pub reset_link: String,
}

/// Password reset use case
pub struct PasswordResetUseCase<U, N>
where
    U: UserRepository,
    N: NotificationDispatcher,
{
    user_repo: Arc<U>,
    notifier: Arc<N>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl<U, N> PasswordResetUseCase<U, N>
where
    U: UserRepository,
    N: NotificationDispatcher,
{
    pub fn new(
        user_repo: Arc<U>,
        notifier: Arc<N>,
        config: Arc<AuthConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            notifier,
            config,
            clock,
        }
    }

    /// Issue a reset token and mail the link.
    ///
    /// An unknown address is reported as such. If delivery fails the token
    /// stays stored and the request fails with `NotificationUnavailable`.
    pub async fn request_reset(&self, email: &str) -> AuthResult<ResetRequestOutput> {
        if email.trim().is_empty() {
            return Err(AuthError::Validation("Email is required".to_string()));
        }

        let email = Email::new(email)?;
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::EmailNotRegistered)?;

        let ttl = Duration::from_std(self.config.reset_token_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid reset token TTL: {e}")))?;
        let now = self.clock.now();
        let token = ResetToken::issue(now, ttl);
        let reset_link = self.config.reset_link(token.value());

        self.user_repo
            .set_reset_token(&user.user_id, &token, now)
            .await?;

        let notification = Notification {
            to: user.email.as_str().to_string(),
            subject: "Password Reset Request".to_string(),
            body: format!(
                "You requested a password reset.\n\n\
                 Open the following link to choose a new password:\n{reset_link}\n\n\
                 This link expires in {} minutes. If you did not request a reset, ignore this email.",
                ttl.num_minutes()
            ),
        };

        if let Err(e) = self.notifier.dispatch(&notification).await {
            tracing::error!(user_id = %user.user_id, error = %e, "Failed to send reset email");
            return Err(AuthError::NotificationUnavailable);
        }

        tracing::info!(user_id = %user.user_id, "Password reset requested");

        Ok(ResetRequestOutput { reset_link })
    }

    /// Redeem a reset token for a new password.
    ///
    /// Checked in order: unknown token, expired token (cleared on sight),
    /// password policy. Success clears the token, so a second use is invalid.
    pub async fn consume_reset(&self, token: &str, new_password: Option<String>) -> AuthResult<()> {
        let new_password = match new_password {
            Some(p) if !p.is_empty() => p,
            _ => return Err(AuthError::Validation("Password is required".to_string())),
        };

        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::TokenInvalid);
        }

        let user = self
            .user_repo
            .find_by_reset_token(token)
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        let now = self.clock.now();
        let expired = match &user.reset_token {
            Some(pending) if pending.matches(token) => pending.is_expired(now),
            _ => return Err(AuthError::TokenInvalid),
        };

        if expired {
            self.user_repo
                .clear_reset_token(&user.user_id, token, now)
                .await?;
            tracing::debug!(user_id = %user.user_id, "Expired reset token cleared");
            return Err(AuthError::TokenExpired);
        }

        SetPasswordUseCase::new(self.user_repo.clone(), self.config.clone(), self.clock.clone())
            .execute(&user.user_id, new_password)
            .await?;

        tracing::info!(user_id = %user.user_id, "Password reset completed");
        Ok(())
    }
}
