//! Sign In Use Case
//!
//! Verifies credentials and signs a session token.

use std::sync::{Arc, OnceLock};

use platform::clock::Clock;

use crate::application::config::AuthConfig;
use crate::application::session_token::SessionTokenIssuer;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub token: String,
    pub user: User,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl<U> SignInUseCase<U>
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

    /// Check an email/password pair.
    ///
    /// Unknown email and wrong password are both `InvalidCredentials`.
    /// The block flag is consulted only once the password has matched.
    pub async fn verify_credentials(&self, email: &str, password: String) -> AuthResult<User> {
        let email = Email::new(email).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password = RawPassword::for_login(password)?;

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            // Same Argon2 cost as a wrong password
            if let Some(dummy) = dummy_hash(self.config.pepper()) {
                let _ = dummy.verify(&raw_password, self.config.pepper());
            }
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.can_login() {
            return Err(AuthError::AccountBlocked);
        }

        Ok(user)
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let mut user = self.verify_credentials(&input.email, input.password).await?;

        let now = self.clock.now();
        self.user_repo.record_login(&user.user_id, now).await?;
        user.record_login(now);

        let token = SessionTokenIssuer::new(self.config.clone(), self.clock.clone()).issue_for(&user)?;

        tracing::info!(user_id = %user.user_id, role = %user.role, "User signed in");

        Ok(SignInOutput { token, user })
    }
}

/// Hash compared against when no account has the email
fn dummy_hash(pepper: Option<&[u8]>) -> Option<&'static UserPassword> {
    static DUMMY: OnceLock<Option<UserPassword>> = OnceLock::new();
    DUMMY
        .get_or_init(|| {
            RawPassword::new("unused-account-password".to_string())
                .and_then(|raw| UserPassword::from_raw(&raw, pepper))
                .ok()
        })
        .as_ref()
}
