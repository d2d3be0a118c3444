//! Bearer Credential Extraction
//!
//! Parses `Authorization: Bearer <token>` headers.

use http::{HeaderMap, header};

/// Outcome of reading the authorization header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BearerCredential<'a> {
    /// No `Authorization` header at all
    Missing,
    /// A header was sent but it is not a usable bearer credential
    Malformed,
    Token(&'a str),
}

/// Read the bearer token from request headers.
///
/// The scheme is matched case-insensitively. Surrounding whitespace is ignored.
pub fn bearer_token(headers: &HeaderMap) -> BearerCredential<'_> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return BearerCredential::Missing;
    };

    let Ok(value) = value.to_str() else {
        return BearerCredential::Malformed;
    };

    match value.trim().split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
            let token = token.trim();
            if token.is_empty() {
                BearerCredential::Malformed
            } else {
                BearerCredential::Token(token)
            }
        }
        _ => BearerCredential::Malformed,
    }
}
