//! Runtime configuration resolved from environment variables.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "SHOP_ANALYTICS_DB_PATH";
pub const ADDR_VAR: &str = "SHOP_ANALYTICS_ADDR";

pub const DEFAULT_DB_PATH: &str = "data/database.json";
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Default `RUST_LOG` filter when none is set.
pub const DEFAULT_LOG_FILTER: &str = "shop_analytics=info,tower_http=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub addr: SocketAddr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidAddr { value: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidAddr { value, message } => {
                write!(f, "invalid {} {:?}: {}", ADDR_VAR, value, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup(DB_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let addr_raw = lookup(ADDR_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw
            .trim()
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidAddr {
                value: addr_raw.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            db_path: PathBuf::from(db_path),
            addr,
        })
    }
}
