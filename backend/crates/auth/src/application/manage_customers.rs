//! Customer Administration Use Case
//!
//! Admin-side listing and blocking of customer accounts.

use std::sync::Arc;

use kernel::id::UserId;
use platform::clock::Clock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

pub struct ManageCustomersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> ManageCustomersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }

    /// Every standard-role account, newest first
    pub async fn list(&self) -> AuthResult<Vec<User>> {
        self.user_repo.list_by_role(UserRole::User).await
    }

    /// Toggle the block flag; blocked users can no longer sign in
    pub async fn set_blocked(&self, user_id: &UserId, is_blocked: bool) -> AuthResult<User> {
        let user = self
            .user_repo
            .set_blocked(user_id, is_blocked, self.clock.now())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(user_id = %user.user_id, is_blocked, "Customer block flag updated");
        Ok(user)
    }
}
