//! Server Configuration
//!
//! Everything the binary reads from the environment. Parsing works over a
//! lookup closure so it can be tested without touching process state.

use std::time::Duration;

use anyhow::{Context, bail};
use auth::{AuthConfig, SmtpSettings};
use base64::Engine;
use base64::engine::general_purpose;

/// Shortest accepted signing key
pub const MIN_TOKEN_SECRET_BYTES: usize = 32;

pub const DEFAULT_PORT: u16 = 5000;

const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `None` runs on the in-memory store (debug builds only)
    pub database_url: Option<String>,
    pub auth: AuthConfig,
    pub smtp: Option<SmtpSettings>,
    pub frontend_origins: Vec<String>,
    pub port: u16,
}

impl ApiConfig {
    /// Read the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Build the configuration from `lookup`.
    ///
    /// Release builds (`development == false`) require `TOKEN_SECRET`;
    /// development builds fall back to a random key and echo reset links.
    pub fn from_lookup<F>(lookup: F, development: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut auth = if development {
            AuthConfig::development()
        } else {
            AuthConfig::default()
        };

        match get("TOKEN_SECRET") {
            Some(encoded) => auth.token_secret = decode_secret("TOKEN_SECRET", &encoded)?,
            None if development => {
                tracing::warn!("TOKEN_SECRET not set, using a random key; sessions end on restart");
            }
            None => bail!("TOKEN_SECRET must be set in production"),
        }

        if let Some(previous) = get("TOKEN_SECRET_PREVIOUS") {
            auth.previous_token_secrets = previous
                .split(',')
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(|key| decode_secret("TOKEN_SECRET_PREVIOUS", key))
                .collect::<anyhow::Result<_>>()?;
        }

        if let Some(ttl) = get("SESSION_TTL_SECS") {
            auth.session_ttl = parse_secs("SESSION_TTL_SECS", &ttl)?;
        }
        if let Some(ttl) = get("RESET_TOKEN_TTL_SECS") {
            auth.reset_token_ttl = parse_secs("RESET_TOKEN_TTL_SECS", &ttl)?;
        }

        auth.admin_secret = get("ADMIN_SECRET");

        if let Some(base) = get("RESET_LINK_BASE") {
            auth.reset_link_base = base;
        }
        if let Some(flag) = get("EXPOSE_RESET_LINK") {
            auth.expose_reset_link = parse_flag("EXPOSE_RESET_LINK", &flag)?;
        }

        let smtp = match get("SMTP_HOST") {
            Some(host) => {
                let port = match get("SMTP_PORT") {
                    Some(port) => port
                        .parse()
                        .with_context(|| format!("SMTP_PORT is not a port number: {port}"))?,
                    None => 587,
                };
                Some(SmtpSettings {
                    host,
                    port,
                    username: get("SMTP_USERNAME").unwrap_or_default(),
                    password: get("SMTP_PASSWORD").unwrap_or_default(),
                    from_address: get("SMTP_FROM").context("SMTP_FROM must be set with SMTP_HOST")?,
                })
            }
            None => None,
        };

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let port = match get("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT is not a port number: {port}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url: get("DATABASE_URL"),
            auth,
            smtp,
            frontend_origins,
            port,
        })
    }
}

fn decode_secret(key: &str, encoded: &str) -> anyhow::Result<Vec<u8>> {
    let bytes = general_purpose::STANDARD
        .decode(encoded)
        .with_context(|| format!("{key} is not valid base64"))?;

    if bytes.len() < MIN_TOKEN_SECRET_BYTES {
        bail!(
            "{key} must decode to at least {MIN_TOKEN_SECRET_BYTES} bytes, got {}",
            bytes.len()
        );
    }

    Ok(bytes)
}

fn parse_secs(key: &str, raw: &str) -> anyhow::Result<Duration> {
    let secs: u64 = raw
        .parse()
        .with_context(|| format!("{key} is not a number of seconds: {raw}"))?;
    if secs == 0 {
        bail!("{key} must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

fn parse_flag(key: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("{key} must be true or false, got {raw}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn secret(byte: u8) -> String {
        general_purpose::STANDARD.encode([byte; 32])
    }

    #[test]
    fn test_development_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[]), true).unwrap();
        assert!(config.database_url.is_none());
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.auth.token_secret.len(), 32);
        assert!(config.auth.expose_reset_link);
        assert!(config.auth.admin_secret.is_none());
        assert!(config.smtp.is_none());
        assert_eq!(config.frontend_origins.len(), 2);
    }

    #[test]
    fn test_release_requires_token_secret() {
        let err = ApiConfig::from_lookup(lookup(&[]), false).unwrap_err();
        assert!(err.to_string().contains("TOKEN_SECRET"));

        let current = secret(1);
        let config =
            ApiConfig::from_lookup(lookup(&[("TOKEN_SECRET", current.as_str())]), false).unwrap();
        assert_eq!(config.auth.token_secret, vec![1u8; 32]);
        assert!(!config.auth.expose_reset_link);
    }

    #[test]
    fn test_short_or_invalid_secret_rejected() {
        let short = general_purpose::STANDARD.encode([1u8; 16]);
        let binding = [("TOKEN_SECRET", short.as_str())];
        let short = lookup(&binding);
        assert!(ApiConfig::from_lookup(short, false).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("TOKEN_SECRET", "%%%")]), false).is_err());
    }

    #[test]
    fn test_full_environment() {
        let current = secret(1);
        let previous = format!("{}, {}", secret(2), secret(3));
        let config = ApiConfig::from_lookup(
            lookup(&[
                ("DATABASE_URL", "postgres://shop@localhost/shop"),
                ("TOKEN_SECRET", current.as_str()),
                ("TOKEN_SECRET_PREVIOUS", previous.as_str()),
                ("SESSION_TTL_SECS", "7200"),
                ("RESET_TOKEN_TTL_SECS", "900"),
                ("ADMIN_SECRET", "open-sesame"),
                ("RESET_LINK_BASE", "https://shop.example/reset-password"),
                ("EXPOSE_RESET_LINK", "false"),
                ("SMTP_HOST", "smtp.example"),
                ("SMTP_PORT", "2525"),
                ("SMTP_USERNAME", "mailer"),
                ("SMTP_PASSWORD", "pw"),
                ("SMTP_FROM", "Boutique <no-reply@shop.example>"),
                ("FRONTEND_ORIGINS", "https://shop.example"),
                ("PORT", "8080"),
            ]),
            true,
        )
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://shop@localhost/shop"));
        assert_eq!(config.auth.previous_token_secrets, vec![vec![2u8; 32], vec![3u8; 32]]);
        assert_eq!(config.auth.session_ttl, Duration::from_secs(7200));
        assert_eq!(config.auth.reset_token_ttl, Duration::from_secs(900));
        assert_eq!(config.auth.admin_secret.as_deref(), Some("open-sesame"));
        assert!(!config.auth.expose_reset_link);
        let smtp = config.smtp.unwrap();
        assert_eq!(smtp.port, 2525);
        assert_eq!(smtp.from_address, "Boutique <no-reply@shop.example>");
        assert_eq!(config.frontend_origins, vec!["https://shop.example".to_string()]);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_bad_numbers_rejected() {
        assert!(ApiConfig::from_lookup(lookup(&[("PORT", "http")]), true).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("SESSION_TTL_SECS", "0")]), true).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("EXPOSE_RESET_LINK", "maybe")]), true).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("SMTP_HOST", "smtp.example")]), true).is_err());
    }
}
