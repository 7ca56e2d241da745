//! Environment configuration

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value}")]
    Invalid { key: String, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

type Result<T> = std::result::Result<T, ConfigError>;

/// Server settings read from the environment.
///
/// Recognized variables:
/// - HOST: bind address (default `0.0.0.0`)
/// - PORT: bind port (default `3000`)
/// - DATABASE_URL: PostgreSQL URL; sets are kept in memory when unset
/// - SESSION_TTL_SECS: idle time before a study session is dropped (default 1800)
/// - SESSION_SWEEP_SECS: how often idle sessions are swept (default 60)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub session_ttl: Duration,
    pub sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("PORT", lookup("PORT"), 3000u16)?;
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let session_ttl = Duration::from_secs(parse_or(
            "SESSION_TTL_SECS",
            lookup("SESSION_TTL_SECS"),
            1800u64,
        )?);
        let sweep_interval = Duration::from_secs(parse_or(
            "SESSION_SWEEP_SECS",
            lookup("SESSION_SWEEP_SECS"),
            60u64,
        )?);

        if sweep_interval.is_zero() {
            return Err(ConfigError::Zero("SESSION_SWEEP_SECS"));
        }

        Ok(Self {
            host,
            port,
            database_url,
            session_ttl,
            sweep_interval,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, value: Option<String>, default: T) -> Result<T> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid {
                key: key.to_string(),
                value: raw,
            }),
        None => Ok(default),
    }
}
