//! Set Password Use Case
//!
//! Replaces a user's password hash. Any pending reset token is cleared in
//! the same write.

use std::sync::Arc;

use kernel::id::UserId;
use platform::clock::Clock;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::AuthResult;

pub struct SetPasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl<U> SetPasswordUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            user_repo,
            config,
            clock,
        }
    }

    /// Validate, hash and persist a new password. Errors with `UserNotFound`
    /// when the account is gone.
    pub async fn execute(&self, user_id: &UserId, new_password: String) -> AuthResult<()> {
        let raw_password = RawPassword::new(new_password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        self.user_repo
            .set_password(user_id, &password_hash, self.clock.now())
            .await?;

        tracing::info!(user_id = %user_id, "Password updated");
        Ok(())
    }
}
