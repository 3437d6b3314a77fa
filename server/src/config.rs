//! Server configuration parsed from environment variables.
//!
//! Required:
//! - `DATABASE_URL`
//! - `EDITOR_PASSWORD` (shared secret editors log in with)
//!
//! Optional:
//! - `PORT`: default 3000
//! - `PIN_CACHE_TTL_SECS`: default 300
//! - `SESSION_TTL_DAYS`: default 30
//! - `COOKIE_SECURE`: `1/true/yes/on` or `0/false/no/off`, default off
//! - `DB_MAX_CONNECTIONS`: default 5
//! - `STATIC_DIR`: directory served at `/` (viewer host page and wasm bundle)

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PIN_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_SESSION_TTL_DAYS: i32 = 30;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {var}")]
    Missing { var: &'static str },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub editor_password: String,
    pub pin_cache_ttl: Duration,
    pub session_ttl_days: i32,
    pub cookie_secure: bool,
    pub db_max_connections: u32,
    pub static_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Build typed config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is absent or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is absent or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = required(&lookup, "DATABASE_URL")?;
        let editor_password = required(&lookup, "EDITOR_PASSWORD")?;

        Ok(Self {
            database_url,
            port: env_parse(&lookup, "PORT", DEFAULT_PORT),
            editor_password,
            pin_cache_ttl: Duration::from_secs(env_parse(&lookup, "PIN_CACHE_TTL_SECS", DEFAULT_PIN_CACHE_TTL_SECS)),
            session_ttl_days: env_parse(&lookup, "SESSION_TTL_DAYS", DEFAULT_SESSION_TTL_DAYS).max(1),
            cookie_secure: env_bool(&lookup, "COOKIE_SECURE").unwrap_or(false),
            db_max_connections: env_parse(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS).max(1),
            static_dir: lookup("STATIC_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<String, ConfigError> {
    let value = lookup(var).ok_or(ConfigError::Missing { var })?;
    if value.trim().is_empty() {
        return Err(ConfigError::Empty { var });
    }
    Ok(value)
}

/// Parse `key`, falling back to `default` when absent or malformed.
fn env_parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Read a boolean flag. `None` when absent or unrecognized.
fn env_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    lookup(key).as_deref().and_then(parse_bool)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
