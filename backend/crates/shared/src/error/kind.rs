//! Error Kind
//!
//! The closed set of failure classes a storefront request can end in.

use std::fmt;

/// Failure class of an [`AppError`](super::app_error::AppError).
///
/// Feature errors (`AuthError`, `OrderError`) pick one of these; the kind
/// alone decides the response status.
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Forbidden.status_code(), 403);
/// assert_eq!(ErrorKind::NotFound.to_string(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Invalid input, failed business rule
    BadRequest,
    /// No usable credentials
    Unauthorized,
    /// Blocked account, or a customer on an admin route
    Forbidden,
    NotFound,
    Conflict,
    InternalServerError,
    /// Database or mail relay out of reach
    ServiceUnavailable,
}

impl ErrorKind {
    const fn parts(self) -> (u16, &'static str) {
        match self {
            ErrorKind::BadRequest => (400, "Bad Request"),
            ErrorKind::Unauthorized => (401, "Unauthorized"),
            ErrorKind::Forbidden => (403, "Forbidden"),
            ErrorKind::NotFound => (404, "Not Found"),
            ErrorKind::Conflict => (409, "Conflict"),
            ErrorKind::InternalServerError => (500, "Internal Server Error"),
            ErrorKind::ServiceUnavailable => (503, "Service Unavailable"),
        }
    }

    #[inline]
    pub const fn status_code(self) -> u16 {
        self.parts().0
    }

    /// Reason phrase of the status line
    #[inline]
    pub const fn reason(self) -> &'static str {
        self.parts().1
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let expected = [
            (ErrorKind::BadRequest, 400),
            (ErrorKind::Unauthorized, 401),
            (ErrorKind::Forbidden, 403),
            (ErrorKind::NotFound, 404),
            (ErrorKind::Conflict, 409),
            (ErrorKind::InternalServerError, 500),
            (ErrorKind::ServiceUnavailable, 503),
        ];
        for (kind, code) in expected {
            assert_eq!(kind.status_code(), code, "{kind}");
        }
    }
}
