//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordPolicyError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    #[error("User already exists")]
    DuplicateEmail,

    /// Unknown email or wrong password, deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is blocked")]
    AccountBlocked,

    /// No bearer token, or the token does not resolve to a user
    #[error("No token, authorization denied")]
    Unauthenticated,

    /// Authenticated but not an admin
    #[error("Access denied. Admin only.")]
    Forbidden,

    #[error("Invalid admin secret")]
    InvalidAdminSecret,

    /// Session token signature or payload rejected
    #[error("Token is not valid")]
    SessionInvalid,

    #[error("Token has expired")]
    SessionExpired,

    /// No user holds this reset token
    #[error("Password reset token is invalid")]
    TokenInvalid,

    #[error("Password reset token has expired")]
    TokenExpired,

    #[error("Password must be at least 6 characters long")]
    WeakPassword,

    #[error("User not found")]
    UserNotFound,

    /// Reset requested for an address with no account
    #[error("No account found with this email")]
    EmailNotRegistered,

    #[error("Error sending email. Please try again later.")]
    NotificationUnavailable,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::DuplicateEmail
            | AuthError::InvalidCredentials
            | AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::WeakPassword => ErrorKind::BadRequest,
            AuthError::Unauthenticated
            | AuthError::InvalidAdminSecret
            | AuthError::SessionInvalid
            | AuthError::SessionExpired => ErrorKind::Unauthorized,
            AuthError::AccountBlocked | AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::UserNotFound | AuthError::EmailNotRegistered => ErrorKind::NotFound,
            AuthError::NotificationUnavailable
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Storage and internal details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::NotificationUnavailable => {
                tracing::error!("Reset notification could not be delivered");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountBlocked => {
                tracing::warn!("Login attempt on blocked account");
            }
            AuthError::InvalidAdminSecret => {
                tracing::warn!("Admin registration with invalid secret");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Value objects report through `AppError`; client errors stay client errors.
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.kind() == ErrorKind::BadRequest {
            AuthError::Validation(err.message().to_string())
        } else {
            AuthError::Internal(err.to_string())
        }
    }
}

impl From<PasswordPolicyError> for AuthError {
    fn from(err: PasswordPolicyError) -> Self {
        match err {
            PasswordPolicyError::TooShort { .. } => AuthError::WeakPassword,
            other => AuthError::Validation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::DuplicateEmail.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::AccountBlocked.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::InvalidAdminSecret.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::SessionExpired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::TokenInvalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::TokenExpired.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::EmailNotRegistered.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::NotificationUnavailable.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let err = AuthError::Internal("argon2 params rejected".into());
        assert_eq!(err.to_app_error().message(), "Server error");

        let err = AuthError::NotificationUnavailable;
        assert_eq!(
            err.to_app_error().message(),
            "Error sending email. Please try again later."
        );
    }

    #[test]
    fn test_policy_errors_map() {
        let short = PasswordPolicyError::TooShort { min: 6, actual: 3 };
        assert!(matches!(AuthError::from(short), AuthError::WeakPassword));
        assert!(matches!(
            AuthError::from(PasswordPolicyError::EmptyOrWhitespace),
            AuthError::Validation(_)
        ));
    }

    #[test]
    fn test_app_error_bad_request_becomes_validation() {
        let err = AuthError::from(AppError::bad_request("Invalid email format"));
        assert!(matches!(err, AuthError::Validation(ref m) if m == "Invalid email format"));
    }
}
