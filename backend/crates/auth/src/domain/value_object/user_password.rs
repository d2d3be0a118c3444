//! User Password Value Object
//!
//! Domain wrapper over `platform::password`.
//! - `RawPassword` holds zeroized clear text coming from a request
//! - `UserPassword` holds the Argon2id PHC string that is persisted
//!
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("secret1".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(hashed.verify(&raw, None));
//! ```

use platform::password::{ClearTextPassword, HashedPassword};
use std::fmt;

use crate::error::{AuthError, AuthResult};

/// Raw password from user input. Memory is zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Accept a new password (registration, reset) under the full policy.
    ///
    /// Too short maps to [`AuthError::WeakPassword`]; other violations are
    /// plain validation errors.
    pub fn new(raw: String) -> AuthResult<Self> {
        ClearTextPassword::new(raw).map(Self).map_err(AuthError::from)
    }

    /// Accept a password presented at login.
    ///
    /// Anything unusable collapses into `InvalidCredentials` so that the
    /// response never hints at the policy.
    pub fn for_login(raw: String) -> AuthResult<Self> {
        ClearTextPassword::for_verification(raw)
            .map(Self)
            .map_err(|_| AuthError::InvalidCredentials)
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Hashed user password for database storage (Argon2id PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password with a fresh per-record salt
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        raw.inner()
            .hash(pepper)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Restore from a stored PHC string
    pub fn from_phc_string(phc_string: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|_| AuthError::Internal("Invalid password hash in database".to_string()))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_password_policy() {
        assert!(RawPassword::new("secret1".to_string()).is_ok());
        assert!(matches!(
            RawPassword::new("12345".to_string()),
            Err(AuthError::WeakPassword)
        ));
        assert!(matches!(
            RawPassword::new("".to_string()),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            RawPassword::new("a".repeat(129)),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn test_login_password_never_reveals_policy() {
        assert!(RawPassword::for_login("abc".to_string()).is_ok());
        assert!(matches!(
            RawPassword::for_login("  ".to_string()),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(hashed.verify(&raw, None));

        let wrong = RawPassword::for_login("secret2".to_string()).unwrap();
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, Some(b"pepper")).unwrap();
        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, Some(b"pepper")));
        assert!(UserPassword::from_phc_string("plaintext").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("hunter22".to_string()).unwrap();
        assert!(!format!("{:?}", raw).contains("hunter22"));

        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2"));
    }
}
