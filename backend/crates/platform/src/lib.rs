//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (CSPRNG, SHA-256, HMAC, hex/Base64url)
//! - Password hashing (Argon2id) and the password policy
//! - Clock abstraction for time-dependent logic
//! - Bearer credential extraction from request headers

pub mod bearer;
pub mod clock;
pub mod crypto;
pub mod password;
