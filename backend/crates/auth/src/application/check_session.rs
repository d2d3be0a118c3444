//! Check Session Use Case
//!
//! Resolves a bearer token to a live user.

use std::sync::Arc;

use kernel::id::UserId;
use platform::clock::Clock;

use crate::application::config::AuthConfig;
use crate::application::session_token::SessionTokenIssuer;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Identity attached to an authenticated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub email: Email,
    /// Role as currently stored, not as claimed in the token
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Check session use case
pub struct CheckSessionUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: SessionTokenIssuer,
}

impl<U> CheckSessionUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            user_repo,
            tokens: SessionTokenIssuer::new(config, clock),
        }
    }

    /// Verify the token, then make sure its subject still exists.
    ///
    /// A valid token whose user is gone is `Unauthenticated`.
    pub async fn execute(&self, token: &str) -> AuthResult<CurrentUser> {
        let claims = self.tokens.verify(token)?;

        let user = self
            .user_repo
            .find_by_id(&claims.sub)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        Ok(CurrentUser {
            user_id: user.user_id,
            email: user.email,
            role: user.role,
        })
    }
}
