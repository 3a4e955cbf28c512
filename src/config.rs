//! Global configuration parsing, environment overrides, and validation.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::persistence::db;
use crate::{AppError, Result};

/// Environment variable holding the database connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

fn default_http_host() -> String {
    "127.0.0.1".into()
}

fn default_http_port() -> u16 {
    8000
}

fn default_max_connections() -> u32 {
    5
}

/// Global configuration parsed from an optional `config.toml`.
///
/// Every field has a default except `database_url`, which must come from
/// the file or from [`DATABASE_URL_ENV`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// `SQLite` connection string, e.g. `sqlite://todos.db`.
    #[serde(default)]
    pub database_url: String,
    /// Interface the HTTP listener binds to.
    #[serde(default = "default_http_host")]
    pub http_host: String,
    /// Port the HTTP listener binds to; 0 picks an ephemeral port.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Upper bound on pooled database connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            http_host: default_http_host(),
            http_port: default_http_port(),
            max_connections: default_max_connections(),
        }
    }
}

impl GlobalConfig {
    /// Build the effective configuration for process startup.
    ///
    /// Reads the TOML file when `path` is given, otherwise starts from
    /// defaults, then applies environment overrides and validates.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or parsed, or
    /// if the resulting configuration is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
                toml::from_str(&raw)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a TOML file path, without
    /// consulting the environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and validate it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace `database_url` with [`DATABASE_URL_ENV`] when it is set and
    /// non-empty.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var(DATABASE_URL_ENV) {
            if !url.trim().is_empty() {
                debug!("database_url taken from environment");
                self.database_url = url;
            }
        }
    }

    /// `host:port` string for the HTTP listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Check that the configuration can start a server.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `database_url` is missing or
    /// malformed, `max_connections` is zero, or `http_host` is empty.
    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            return Err(AppError::Config(format!(
                "database_url is not configured; set {DATABASE_URL_ENV} or add it to the config file"
            )));
        }
        db::parse_url(&self.database_url)?;

        if self.max_connections == 0 {
            return Err(AppError::Config(
                "max_connections must be greater than zero".into(),
            ));
        }

        if self.http_host.trim().is_empty() {
            return Err(AppError::Config("http_host must not be empty".into()));
        }

        Ok(())
    }
}
