//! Application Error
//!
//! [`AppError`] is what every feature error becomes before it is written
//! to the wire as `{"message": ..., "action"?: ...}`.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

type Message = Cow<'static, str>;

/// Rendered error: a kind, a client-facing message, an optional hint and
/// an optional cause that only ever reaches the logs.
///
/// ```rust
/// use kernel::error::app_error::AppError;
///
/// let err = AppError::bad_request("Invalid email format")
///     .with_action("Please enter a valid email address");
/// assert_eq!(err.status_code(), 400);
/// assert_eq!(err.action(), Some("Please enter a valid email address"));
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Message,
    action: Option<Message>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Message>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn forbidden(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn not_found(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn internal(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    pub fn service_unavailable(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// Tell the client what to do about it
    pub fn with_action(mut self, action: impl Into<Message>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Keep the cause for logging; it is never serialized
    pub fn with_source(mut self, source: impl Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("action", &self.action)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_drives_status() {
        assert_eq!(AppError::bad_request("x").status_code(), 400);
        assert_eq!(AppError::forbidden("x").status_code(), 403);
        assert_eq!(AppError::not_found("x").status_code(), 404);
        assert_eq!(AppError::conflict("x").status_code(), 409);
        assert_eq!(AppError::internal("x").status_code(), 500);
        assert_eq!(AppError::service_unavailable("x").status_code(), 503);
        assert_eq!(AppError::new(ErrorKind::Unauthorized, "x").status_code(), 401);
    }

    #[test]
    fn test_source_is_kept_but_not_displayed() {
        let err = AppError::internal("Server error")
            .with_source(std::io::Error::other("connection refused"));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Internal Server Error: Server error");
        assert!(format!("{err:?}").contains("connection refused"));
    }

    #[test]
    fn test_action_hint() {
        let err = AppError::bad_request("Invalid email").with_action("Enter a valid email");
        assert_eq!(err.message(), "Invalid email");
        assert_eq!(err.action(), Some("Enter a valid email"));
    }
}
