//! Application configuration module
//!
//! Provides the runtime configuration for the messaging server. Values come either
//! from the builder (tests, embedding) or from environment variables via
//! [`AppConfig::from_env`].
//!
//! | Variable            | Default                                   |
//! |---------------------|-------------------------------------------|
//! | `DATABASE_URL`      | `sqlite:<data dir>/classchat/classchat.db` |
//! | `SERVER_PORT`       | `3000`                                    |
//! | `JWT_SECRET`        | required                                  |
//! | `ROSTER_PATH`       | unset (no roster import)                  |
//! | `LOCK_CLEANUP_SECS` | `300`                                     |

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOCK_CLEANUP_SECS: u64 = 300;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// sqlx connection URL for the message store and directory
    pub database_url: String,
    /// Port the HTTP server binds on all interfaces
    pub port: u16,
    /// HS256 secret used to verify bearer tokens
    pub jwt_secret: String,
    /// Optional TOML roster imported into the user directory at startup
    pub roster_path: Option<PathBuf>,
    /// How often idle per-conversation write locks are dropped
    pub lock_cleanup_interval: Duration,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT", port))?;
            builder = builder.port(port);
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Ok(path) = std::env::var("ROSTER_PATH") {
            builder = builder.roster_path(path);
        }
        if let Ok(secs) = std::env::var("LOCK_CLEANUP_SECS") {
            let secs = secs
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue("LOCK_CLEANUP_SECS", secs))?;
            builder = builder.lock_cleanup_interval(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if !self.database_url.starts_with("sqlite:") {
            return Err(ConfigError::InvalidValue(
                "DATABASE_URL",
                self.database_url.clone(),
            ));
        }
        if self.lock_cleanup_interval.is_zero() {
            return Err(ConfigError::InvalidValue(
                "LOCK_CLEANUP_SECS",
                "0".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the store lives only in memory for the lifetime of the process
    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

/// Default on-disk database location under the platform data directory
fn default_database_url() -> String {
    let mut path = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
    path.push("classchat");
    path.push("classchat.db");
    format!("sqlite:{}", path.to_string_lossy())
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    port: Option<u16>,
    jwt_secret: Option<String>,
    roster_path: Option<PathBuf>,
    lock_cleanup_interval: Option<Duration>,
}

impl AppConfigBuilder {
    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the listen port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the token secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Set the roster file imported at startup
    pub fn roster_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.roster_path = Some(path.into());
        self
    }

    /// Set the idle lock cleanup interval
    pub fn lock_cleanup_interval(mut self, interval: Duration) -> Self {
        self.lock_cleanup_interval = Some(interval);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            database_url: self.database_url.unwrap_or_else(default_database_url),
            port: self.port.unwrap_or(DEFAULT_PORT),
            jwt_secret: self.jwt_secret.ok_or(ConfigError::MissingValue("JWT_SECRET"))?,
            roster_path: self.roster_path,
            lock_cleanup_interval: self
                .lock_cleanup_interval
                .unwrap_or(Duration::from_secs(DEFAULT_LOCK_CLEANUP_SECS)),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
