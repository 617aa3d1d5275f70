//! Environment-driven server configuration.
//!
//! # Responsibility
//! - Read every runtime setting once at startup.
//! - Apply defaults and reject unusable values before anything is bound.
//!
//! # Invariants
//! - `api_key` is never empty and never printed by `Debug`.

use catalog_core::{default_log_level, DEFAULT_PROTECTED_PREFIX};
use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const ENV_API_KEY: &str = "CATALOG_API_KEY";
pub const ENV_BIND_ADDR: &str = "CATALOG_BIND_ADDR";
pub const ENV_DB_PATH: &str = "CATALOG_DB_PATH";
pub const ENV_API_PREFIX: &str = "CATALOG_API_PREFIX";
pub const ENV_LOG_LEVEL: &str = "CATALOG_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CATALOG_LOG_DIR";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Configuration loading errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidVar {
        name: &'static str,
        value: String,
        message: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVar(name) => write!(f, "required environment variable `{name}` is not set"),
            Self::InvalidVar {
                name,
                value,
                message,
            } => write!(f, "invalid value `{value}` for `{name}`: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Runtime settings for `catalog_server`.
#[derive(Clone)]
pub struct ServerConfig {
    pub api_key: String,
    pub bind_addr: SocketAddr,
    /// `None` selects a fresh in-memory database.
    pub db_path: Option<PathBuf>,
    pub api_prefix: String,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl Debug for ServerConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_key", &"<redacted>")
            .field("bind_addr", &self.bind_addr)
            .field("db_path", &self.db_path)
            .field("api_prefix", &self.api_prefix)
            .field("log_level", &self.log_level)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

impl ServerConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = read(ENV_API_KEY).ok_or(ConfigError::MissingVar(ENV_API_KEY))?;

        let bind_text = read(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_text
            .trim()
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::InvalidVar {
                name: ENV_BIND_ADDR,
                value: bind_text.clone(),
                message: err.to_string(),
            })?;

        let api_prefix = read(ENV_API_PREFIX)
            .map(|value| value.trim().to_string())
            .unwrap_or_else(|| DEFAULT_PROTECTED_PREFIX.to_string());
        if !api_prefix.starts_with('/') {
            return Err(ConfigError::InvalidVar {
                name: ENV_API_PREFIX,
                value: api_prefix,
                message: "must start with `/`".to_string(),
            });
        }

        let log_dir = read(ENV_LOG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(default_log_dir);

        Ok(Self {
            api_key,
            bind_addr,
            db_path: read(ENV_DB_PATH).map(PathBuf::from),
            api_prefix,
            log_level: read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir,
        })
    }
}

fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join("product_catalog").join("logs")
}
