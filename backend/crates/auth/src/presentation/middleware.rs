//! Auth Middleware
//!
//! Bearer-token gate for protected routes. The resolved [`CurrentUser`] is
//! stored in request extensions for downstream handlers.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::{BearerCredential, bearer_token};
use platform::clock::Clock;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{CheckSessionUseCase, CurrentUser};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Middleware state
pub struct AuthGate<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub clock: Arc<dyn Clock>,
}

impl<R> Clone for AuthGate<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<R> AuthGate<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            config,
            clock,
        }
    }

    /// Resolve a presented token to the stored user
    pub async fn authenticate(&self, token: &str) -> AuthResult<CurrentUser> {
        CheckSessionUseCase::new(self.repo.clone(), self.config.clone(), self.clock.clone())
            .execute(token)
            .await
    }
}

/// Middleware that requires a valid bearer token
pub async fn require_auth<R>(
    State(gate): State<AuthGate<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Send + Sync + 'static,
{
    let current = match bearer_token(req.headers()) {
        BearerCredential::Missing => return Err(AuthError::Unauthenticated),
        BearerCredential::Malformed => return Err(AuthError::SessionInvalid),
        BearerCredential::Token(token) => gate.authenticate(token).await?,
    };

    req.extensions_mut().insert(current);
    Ok(next.run(req).await)
}

/// Middleware that admits admins only. Must run after [`require_auth`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AuthError> {
    match req.extensions().get::<CurrentUser>() {
        Some(current) if current.is_admin() => Ok(next.run(req).await),
        Some(current) => {
            tracing::debug!(user_id = %current.user_id, "Non-admin rejected");
            Err(AuthError::Forbidden)
        }
        None => Err(AuthError::Unauthenticated),
    }
}

/// Middleware that attaches the user when a token is present.
///
/// No header means an anonymous request. A header that does not resolve
/// is still rejected so a stale token never silently turns into a guest.
pub async fn optional_auth<R>(
    State(gate): State<AuthGate<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Send + Sync + 'static,
{
    match bearer_token(req.headers()) {
        BearerCredential::Missing => {}
        BearerCredential::Malformed => return Err(AuthError::SessionInvalid),
        BearerCredential::Token(token) => {
            let current = gate.authenticate(token).await?;
            req.extensions_mut().insert(current);
        }
    }

    Ok(next.run(req).await)
}
