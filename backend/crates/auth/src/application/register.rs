//! Register Use Case
//!
//! Creates a user (standard or admin) and signs an initial session token.

use std::sync::Arc;

use platform::clock::Clock;
use platform::crypto::constant_time_eq;

use crate::application::config::AuthConfig;
use crate::application::session_token::SessionTokenIssuer;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    person_name::PersonName,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Register output
pub struct RegisterOutput {
    pub user: User,
    pub token: String,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl<U> RegisterUseCase<U>
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

    /// Register a standard customer account
    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        self.register(input, UserRole::User).await
    }

    /// Register an admin account, gated by the configured shared secret
    pub async fn register_admin(
        &self,
        input: RegisterInput,
        admin_secret: &str,
    ) -> AuthResult<RegisterOutput> {
        let authorized = match &self.config.admin_secret {
            Some(expected) => constant_time_eq(expected.as_bytes(), admin_secret.as_bytes()),
            None => false,
        };

        if !authorized {
            return Err(AuthError::InvalidAdminSecret);
        }

        self.register(input, UserRole::Admin).await
    }

    /// Validate, hash, persist, then sign a session for the new user
    pub async fn register(&self, input: RegisterInput, role: UserRole) -> AuthResult<RegisterOutput> {
        if [&input.email, &input.password, &input.first_name, &input.last_name]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(AuthError::Validation("All fields are required".to_string()));
        }

        let email = Email::new(&input.email)?;
        let first_name = PersonName::new(&input.first_name, "First name")?;
        let last_name = PersonName::new(&input.last_name, "Last name")?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(
            email,
            password_hash,
            role,
            first_name,
            last_name,
            self.clock.now(),
        );

        // A concurrent registration can still win the race; the store's
        // unique constraint reports it as DuplicateEmail.
        self.user_repo.create(&user).await?;

        let token = SessionTokenIssuer::new(self.config.clone(), self.clock.clone()).issue_for(&user)?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.role,
            "User registered"
        );

        Ok(RegisterOutput { user, token })
    }
}
