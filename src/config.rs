//! Runtime configuration.
//!
//! Values come from built-in defaults overridden by raw environment variables
//! (`HOST`, `PORT`, `SESSION_SECRET`, `DATABASE_URL`, `LOGLEVEL`,
//! `SESSION_TTL_MINUTES`, `COOKIE_SECURE`). `main` loads `.env` first.

use crate::error::IntakeError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// The cookie key is derived from the secret and needs at least this much input.
pub const MIN_SECRET_LEN: usize = 32;

const ENV_KEYS: [&str; 7] = [
    "host",
    "port",
    "session_secret",
    "database_url",
    "loglevel",
    "session_ttl_minutes",
    "cookie_secure",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub session_secret: Option<String>,
    pub database_url: String,
    pub loglevel: String,
    pub session_ttl_minutes: i64,
    pub cookie_secure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            session_secret: None,
            database_url: "sqlite://job-intake.db".to_string(),
            loglevel: "info".to_string(),
            session_ttl_minutes: 24 * 60,
            cookie_secure: false,
        }
    }
}

impl Config {
    /// Load from the process environment and validate.
    pub fn from_env() -> Result<Self, IntakeError> {
        Self::from_figment(Figment::from(Serialized::defaults(Config::default())).merge(
            Env::raw().only(&ENV_KEYS),
        ))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, IntakeError> {
        let cfg: Config = figment.extract()?;
        cfg.session_secret()?;
        Ok(cfg)
    }

    /// The session signing secret; the process must not start without one.
    pub fn session_secret(&self) -> Result<&str, IntakeError> {
        match self.session_secret.as_deref() {
            None | Some("") => Err(IntakeError::Config(
                "SESSION_SECRET must be set".to_string(),
            )),
            Some(s) if s.len() < MIN_SECRET_LEN => Err(IntakeError::Config(format!(
                "SESSION_SECRET must be at least {MIN_SECRET_LEN} bytes"
            ))),
            Some(s) => Ok(s),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, IntakeError> {
        self.bind_addr()
            .parse()
            .map_err(|e| IntakeError::Config(format!("invalid bind address: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::Serialized;

    fn with_secret(secret: Option<&str>) -> Figment {
        let cfg = Config {
            session_secret: secret.map(str::to_string),
            ..Config::default()
        };
        Figment::from(Serialized::defaults(cfg))
    }

    #[test]
    fn missing_secret_is_rejected() {
        let err = Config::from_figment(with_secret(None)).unwrap_err();
        assert!(err.to_string().contains("SESSION_SECRET must be set"));
    }

    #[test]
    fn short_secret_is_rejected() {
        let err = Config::from_figment(with_secret(Some("too-short"))).unwrap_err();
        assert!(err.to_string().contains("at least 32 bytes"));
    }

    #[test]
    fn defaults_apply_when_only_secret_is_given() {
        let secret = "x".repeat(MIN_SECRET_LEN);
        let cfg = Config::from_figment(with_secret(Some(&secret))).unwrap();
        assert_eq!(cfg.bind_addr(), "127.0.0.1:3000");
        assert_eq!(cfg.session_ttl_minutes, 1440);
        assert!(!cfg.cookie_secure);
    }

    #[test]
    fn later_providers_override_defaults() {
        let secret = "y".repeat(40);
        let figment = with_secret(Some(&secret))
            .merge(Serialized::default("port", 8080))
            .merge(Serialized::default("host", "0.0.0.0"));
        let cfg = Config::from_figment(figment).unwrap();
        assert_eq!(cfg.socket_addr().unwrap().port(), 8080);
        assert_eq!(cfg.host, "0.0.0.0");
    }
}
