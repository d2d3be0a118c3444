//! HTTP Handlers

use axum::Extension;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use kernel::extract::AppJson;
use kernel::id::UserId;
use platform::bearer::{BearerCredential, bearer_token};
use platform::clock::Clock;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, CurrentUser, ManageCustomersUseCase, PasswordResetUseCase, RegisterInput,
    RegisterUseCase, SignInInput, SignInUseCase,
};
use crate::domain::notification::NotificationDispatcher;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CustomerResponse, ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest, LoginResponse,
    MessageResponse, PublicUser, RegisterAdminRequest, RegisterRequest, ResetPasswordRequest,
    SetBlockedRequest, TokenResponse, VerifyResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<R, N> {
    pub repo: Arc<R>,
    pub notifier: Arc<N>,
    pub config: Arc<AuthConfig>,
    pub clock: Arc<dyn Clock>,
}

impl<R, N> Clone for AuthAppState<R, N> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            notifier: self.notifier.clone(),
            config: self.config.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<R, N> AuthAppState<R, N>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn register_use_case(&self) -> RegisterUseCase<R> {
        RegisterUseCase::new(self.repo.clone(), self.config.clone(), self.clock.clone())
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /auth/register
pub async fn register<R, N>(
    State(state): State<AuthAppState<R, N>>,
    AppJson(req): AppJson<RegisterRequest>,
) -> AuthResult<(StatusCode, AppJson<TokenResponse>)>
where
    R: UserRepository + Send + Sync + 'static,
    N: NotificationDispatcher + Send + Sync + 'static,
{
    let input = RegisterInput {
        email: req.email,
        password: req.password,
        first_name: req.first_name,
        last_name: req.last_name,
    };

    let output = state.register_use_case().execute(input).await?;

    Ok((
        StatusCode::CREATED,
        AppJson(TokenResponse {
            token: output.token,
        }),
    ))
}

/// POST /auth/register-admin
pub async fn register_admin<R, N>(
    State(state): State<AuthAppState<R, N>>,
    AppJson(req): AppJson<RegisterAdminRequest>,
) -> AuthResult<(StatusCode, AppJson<TokenResponse>)>
where
    R: UserRepository + Send + Sync + 'static,
    N: NotificationDispatcher + Send + Sync + 'static,
{
    let input = RegisterInput {
        email: req.email,
        password: req.password,
        first_name: req.first_name,
        last_name: req.last_name,
    };

    let output = state
        .register_use_case()
        .register_admin(input, &req.admin_secret)
        .await?;

    Ok((
        StatusCode::CREATED,
        AppJson(TokenResponse {
            token: output.token,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
pub async fn login<R, N>(
    State(state): State<AuthAppState<R, N>>,
    AppJson(req): AppJson<LoginRequest>,
) -> AuthResult<AppJson<LoginResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    N: NotificationDispatcher + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone(), state.clock.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(AppJson(LoginResponse {
        user: PublicUser::from(&output.user),
        token: output.token,
    }))
}

// ============================================================================
// Verify
// ============================================================================

/// GET /auth/verify
///
/// Always answers with a `valid` flag; failures are 401.
pub async fn verify<R, N>(State(state): State<AuthAppState<R, N>>, headers: HeaderMap) -> Response
where
    R: UserRepository + Send + Sync + 'static,
    N: NotificationDispatcher + Send + Sync + 'static,
{
    let result = match bearer_token(&headers) {
        BearerCredential::Missing => Err(AuthError::Unauthenticated),
        BearerCredential::Malformed => Err(AuthError::SessionInvalid),
        BearerCredential::Token(token) => {
            CheckSessionUseCase::new(state.repo.clone(), state.config.clone(), state.clock.clone())
                .execute(token)
                .await
        }
    };

    match result {
        Ok(current) => AppJson(VerifyResponse {
            valid: true,
            role: Some(current.role.code().to_string()),
            user_id: Some(current.user_id.to_string()),
            message: None,
        })
        .into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "Token verification failed");
            let message = match e {
                AuthError::Database(_) | AuthError::Internal(_) => "Server error".to_string(),
                other => other.to_string(),
            };
            (
                StatusCode::UNAUTHORIZED,
                AppJson(VerifyResponse {
                    valid: false,
                    role: None,
                    user_id: None,
                    message: Some(message),
                }),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /auth/forgot-password
pub async fn forgot_password<R, N>(
    State(state): State<AuthAppState<R, N>>,
    AppJson(req): AppJson<ForgotPasswordRequest>,
) -> AuthResult<AppJson<ForgotPasswordResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    N: NotificationDispatcher + Send + Sync + 'static,
{
    let use_case = PasswordResetUseCase::new(
        state.repo.clone(),
        state.notifier.clone(),
        state.config.clone(),
        state.clock.clone(),
    );

    let output = use_case.request_reset(&req.email).await?;

    Ok(AppJson(ForgotPasswordResponse {
        message: "Password reset email sent".to_string(),
        debug: state.config.expose_reset_link.then_some(output.reset_link),
    }))
}

/// POST /auth/reset-password/{token}
pub async fn reset_password<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Path(token): Path<String>,
    AppJson(req): AppJson<ResetPasswordRequest>,
) -> AuthResult<AppJson<MessageResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    N: NotificationDispatcher + Send + Sync + 'static,
{
    let use_case = PasswordResetUseCase::new(
        state.repo.clone(),
        state.notifier.clone(),
        state.config.clone(),
        state.clock.clone(),
    );

    use_case.consume_reset(&token, req.password).await?;

    Ok(AppJson(MessageResponse::new("Password has been reset successfully")))
}

// ============================================================================
// Customer Administration (admin only)
// ============================================================================

/// GET /admin/customers
pub async fn list_customers<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Extension(admin): Extension<CurrentUser>,
) -> AuthResult<AppJson<Vec<CustomerResponse>>>
where
    R: UserRepository + Send + Sync + 'static,
    N: NotificationDispatcher + Send + Sync + 'static,
{
    let customers = ManageCustomersUseCase::new(state.repo.clone(), state.clock.clone())
        .list()
        .await?;

    tracing::debug!(admin_id = %admin.user_id, count = customers.len(), "Customers listed");

    Ok(AppJson(customers.iter().map(CustomerResponse::from).collect()))
}

/// PATCH /admin/customers/{id}/block
pub async fn set_customer_blocked<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<String>,
    AppJson(req): AppJson<SetBlockedRequest>,
) -> AuthResult<AppJson<CustomerResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    N: NotificationDispatcher + Send + Sync + 'static,
{
    let user_id: UserId = id.parse().map_err(|_| AuthError::UserNotFound)?;

    let user = ManageCustomersUseCase::new(state.repo.clone(), state.clock.clone())
        .set_blocked(&user_id, req.is_blocked)
        .await?;

    tracing::info!(
        admin_id = %admin.user_id,
        user_id = %user.user_id,
        is_blocked = user.is_blocked,
        "Customer block flag updated"
    );

    Ok(AppJson(CustomerResponse::from(&user)))
}
