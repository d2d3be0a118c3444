//! In-Memory Implementations
//!
//! Process-local credential store and notifier. Used by tests and by
//! debug builds started without `DATABASE_URL`.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use tokio::sync::{Mutex, RwLock};

use crate::domain::entity::user::User;
use crate::domain::notification::{Notification, NotificationDispatcher, NotificationError};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, reset_token::ResetToken, user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// In-memory credential store. Clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        // Checked under the write lock, mirroring the unique index
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::DuplicateEmail);
        }

        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.email == email).cloned())
    }

    async fn find_by_reset_token(&self, token: &str) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.reset_token.as_ref().is_some_and(|t| t.matches(token)))
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| &u.email == email))
    }

    async fn record_login(&self, user_id: &UserId, at: DateTime<Utc>) -> AuthResult<()> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(user_id).ok_or(AuthError::UserNotFound)?;
        stored.record_login(at);
        Ok(())
    }

    async fn set_blocked(
        &self,
        user_id: &UserId,
        is_blocked: bool,
        at: DateTime<Utc>,
    ) -> AuthResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(user_id).map(|stored| {
            stored.set_blocked(is_blocked, at);
            stored.clone()
        }))
    }

    async fn set_password(
        &self,
        user_id: &UserId,
        password_hash: &UserPassword,
        at: DateTime<Utc>,
    ) -> AuthResult<()> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(user_id).ok_or(AuthError::UserNotFound)?;
        stored.set_password(password_hash.clone(), at);
        Ok(())
    }

    async fn set_reset_token(
        &self,
        user_id: &UserId,
        token: &ResetToken,
        at: DateTime<Utc>,
    ) -> AuthResult<()> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(user_id).ok_or(AuthError::UserNotFound)?;
        stored.issue_reset(token.clone(), at);
        Ok(())
    }

    async fn clear_reset_token(
        &self,
        user_id: &UserId,
        token: &str,
        at: DateTime<Utc>,
    ) -> AuthResult<bool> {
        let mut users = self.users.write().await;
        match users.get_mut(user_id) {
            Some(stored) if stored.reset_token.as_ref().is_some_and(|t| t.matches(token)) => {
                stored.clear_reset(at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_by_role(&self, role: UserRole) -> AuthResult<Vec<User>> {
        let users = self.users.read().await;
        let mut matching: Vec<User> = users.values().filter(|u| u.role == role).cloned().collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn clear_expired_reset_tokens(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let mut users = self.users.write().await;
        let mut cleared = 0;
        for user in users.values_mut() {
            if user.reset_token.as_ref().is_some_and(|t| t.expires_at() < now) {
                user.clear_reset(now);
                cleared += 1;
            }
        }
        Ok(cleared)
    }
}

/// Notifier that records every message instead of sending it.
#[derive(Clone, Default)]
pub struct InMemoryNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent dispatches fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.lock().await.clone()
    }
}

impl NotificationDispatcher for InMemoryNotifier {
    async fn dispatch(&self, notification: &Notification) -> Result<(), NotificationError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotificationError::Delivery("relay refused connection".to_string()));
        }
        self.sent.lock().await.push(notification.clone());
        Ok(())
    }
}
