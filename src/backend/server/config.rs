/**
 * Server Configuration
 *
 * Configuration is read once at startup from environment variables (after
 * `.env` is loaded by the binary) into a `ServerConfig`.
 *
 * # Variables
 *
 * | Variable               | Required | Default |
 * |------------------------|----------|---------|
 * | `SECRET_KEY`           | yes      |         |
 * | `FOUNDER_USERNAME`     | yes      |         |
 * | `FOUNDER_PASSWORD`     | yes      |         |
 * | `DATABASE_URL`         | yes      |         |
 * | `SERVER_PORT`          | no       | 1873    |
 * | `STORE_TIMEOUT_MS`     | no       | 1000    |
 * | `TOKEN_TTL_SECS`       | no       | 300     |
 * | `FOUNDER_RECHECK_SECS` | no       | 300     |
 * | `BCRYPT_COST`          | no       | 10      |
 *
 * A missing or blank required variable is a fatal startup error.
 * `DATABASE_URL=memory` selects the non-durable in-process store.
 * `TOKEN_TTL_SECS` must lie in `1..=86400`.
 */

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::backend::auth::password::DEFAULT_HASH_COST;

pub const DEFAULT_PORT: u16 = 1873;

/// `DATABASE_URL` value that selects the in-process store
pub const MEMORY_STORE_URL: &str = "memory";

/// Upper bound for `TOKEN_TTL_SECS`
pub const MAX_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingValue(&'static str),
    #[error("{name} has an invalid value: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Where accounts are kept
#[derive(Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL at the given connection URL
    Postgres(String),
    /// Process memory; lost on restart
    Memory,
}

impl StoreBackend {
    fn from_url(url: String) -> Self {
        if url.eq_ignore_ascii_case(MEMORY_STORE_URL) {
            Self::Memory
        } else {
            Self::Postgres(url)
        }
    }
}

impl fmt::Debug for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // connection URLs carry credentials
        match self {
            Self::Postgres(_) => f.write_str("Postgres"),
            Self::Memory => f.write_str("Memory"),
        }
    }
}

/// Everything the server needs to start
#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub secret_key: Vec<u8>,
    pub founder_username: String,
    pub founder_password: String,
    pub store: StoreBackend,
    pub port: u16,
    pub store_timeout: Duration,
    pub token_ttl: Duration,
    pub founder_recheck: Duration,
    pub bcrypt_cost: u32,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("founder_username", &self.founder_username)
            .field("store", &self.store)
            .field("port", &self.port)
            .field("store_timeout", &self.store_timeout)
            .field("token_ttl", &self.token_ttl)
            .field("founder_recheck", &self.founder_recheck)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish_non_exhaustive()
    }
}

impl ServerConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from any name → value lookup
    ///
    /// # Arguments
    /// * `lookup` - Returns the raw value of a variable, `None` if unset
    ///
    /// # Returns
    /// The parsed configuration, or the first missing or invalid variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |name: &'static str| value(name).ok_or(ConfigError::MissingValue(name));

        Ok(Self {
            secret_key: required("SECRET_KEY")?.into_bytes(),
            founder_username: required("FOUNDER_USERNAME")?,
            founder_password: required("FOUNDER_PASSWORD")?,
            store: StoreBackend::from_url(required("DATABASE_URL")?),
            port: parse_or("SERVER_PORT", value("SERVER_PORT"), DEFAULT_PORT)?,
            store_timeout: Duration::from_millis(parse_or(
                "STORE_TIMEOUT_MS",
                value("STORE_TIMEOUT_MS"),
                1000,
            )?),
            token_ttl: Duration::from_secs(token_ttl_secs(value("TOKEN_TTL_SECS"))?),
            founder_recheck: Duration::from_secs(parse_or(
                "FOUNDER_RECHECK_SECS",
                value("FOUNDER_RECHECK_SECS"),
                300,
            )?),
            bcrypt_cost: parse_or("BCRYPT_COST", value("BCRYPT_COST"), DEFAULT_HASH_COST)?,
        })
    }
}

fn token_ttl_secs(raw: Option<String>) -> Result<u64, ConfigError> {
    let secs = parse_or("TOKEN_TTL_SECS", raw, 300)?;
    if secs == 0 || secs > MAX_TOKEN_TTL_SECS {
        return Err(ConfigError::InvalidValue {
            name: "TOKEN_TTL_SECS",
            value: secs.to_string(),
        });
    }
    Ok(secs)
}

fn parse_or<T: FromStr>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}
