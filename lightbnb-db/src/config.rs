//! Connection configuration
//!
//! Sources, highest precedence first:
//! - an explicit connection URL (`DATABASE_URL` or [`DbConfig::with_url`])
//! - a TOML file overlaid with [`DbConfig::overlay_file`]
//! - `LIGHTBNB_DB_*` environment variables
//! - built-in defaults for the local development database
//!
//! Each layer only replaces the keys it sets:
//!
//! ```ignore
//! let config = DbConfig::from_env()?.overlay_file(path)?;
//! ```

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;

use crate::error::{DbError, Result};

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time to wait for a free connection.
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Database connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Full connection string; overrides the individual fields when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Keys present in a TOML config file
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    host: Option<String>,
    port: Option<u16>,
    user: Option<String>,
    password: Option<String>,
    database: Option<String>,
    max_connections: Option<u32>,
    acquire_timeout_secs: Option<u64>,
    url: Option<String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "labber".to_string(),
            password: "labber".to_string(),
            database: "lightbnb".to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
            url: None,
        }
    }
}

impl DbConfig {
    /// Create config from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    ///
    /// Reads `LIGHTBNB_DB_HOST`, `LIGHTBNB_DB_PORT`, `LIGHTBNB_DB_USER`,
    /// `LIGHTBNB_DB_PASSWORD`, `LIGHTBNB_DB_NAME`,
    /// `LIGHTBNB_DB_MAX_CONNECTIONS` and `DATABASE_URL`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("LIGHTBNB_DB_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("LIGHTBNB_DB_PORT") {
            config.port = parse_var("LIGHTBNB_DB_PORT", &port)?;
        }
        if let Some(user) = lookup("LIGHTBNB_DB_USER") {
            config.user = user;
        }
        if let Some(password) = lookup("LIGHTBNB_DB_PASSWORD") {
            config.password = password;
        }
        if let Some(database) = lookup("LIGHTBNB_DB_NAME") {
            config.database = database;
        }
        if let Some(max) = lookup("LIGHTBNB_DB_MAX_CONNECTIONS") {
            config.max_connections = parse_var("LIGHTBNB_DB_MAX_CONNECTIONS", &max)?;
        }
        config.url = lookup("DATABASE_URL").filter(|url| !url.is_empty());

        Ok(config)
    }

    /// Parse config from TOML text over the defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Self::default().overlay_toml_str(text)
    }

    /// Load config from a TOML file over the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        Self::default().overlay_file(path)
    }

    /// Replace the keys set in `text`; everything else is kept.
    ///
    /// A `url` key only applies when no URL is set yet, so `DATABASE_URL`
    /// still wins over the file.
    pub fn overlay_toml_str(mut self, text: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(text).map_err(|e| DbError::config(format!("invalid config: {}", e)))?;

        if let Some(host) = file.host {
            self.host = host;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(user) = file.user {
            self.user = user;
        }
        if let Some(password) = file.password {
            self.password = password;
        }
        if let Some(database) = file.database {
            self.database = database;
        }
        if let Some(max) = file.max_connections {
            self.max_connections = max;
        }
        if let Some(timeout) = file.acquire_timeout_secs {
            self.acquire_timeout_secs = timeout;
        }
        if self.url.is_none() {
            self.url = file.url.filter(|url| !url.is_empty());
        }

        Ok(self)
    }

    /// Read a TOML file and overlay it, see [`DbConfig::overlay_toml_str`].
    pub fn overlay_file(self, path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DbError::config(format!("cannot read {}: {}", path.display(), e)))?;
        self.overlay_toml_str(&text)
    }

    /// Use an explicit connection string.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Connection options for the pool.
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        if self.max_connections == 0 {
            return Err(DbError::config("max_connections must be at least 1"));
        }

        match &self.url {
            Some(url) => PgConnectOptions::from_str(url)
                .map_err(|e| DbError::config(format!("invalid database url: {}", e))),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.database)),
        }
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| DbError::config(format!("{} has invalid value '{}'", key, value)))
}
