//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file, falls back to built-in
//! defaults when the file is absent, and applies environment-variable
//! overrides (`PORT`, `DATABASE_URL`, `GIT_COMMIT`) on top. `AppConfig` is
//! the root configuration struct containing all settings.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::health::DEFAULT_CHECK_TIMEOUT;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "colada=debug,sqlx=warn";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Reported for build metadata that is absent from the environment
pub const UNKNOWN_BUILD_VALUE: &str = "N/A";

/// Cache-Control for health and registry responses: pollers and
/// intermediaries must always see fresh state.
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Database pool and health-probe configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Version string, populated at runtime
    #[serde(skip_deserializing, default = "AppConfig::default_version")]
    pub version: String,
    /// Commit hash, populated from the GIT_COMMIT environment variable
    #[serde(skip_deserializing, default = "AppConfig::default_git_commit")]
    pub git_commit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            version: Self::default_version(),
            git_commit: Self::default_git_commit(),
        }
    }
}

impl AppConfig {
    fn default_version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn default_git_commit() -> String {
        UNKNOWN_BUILD_VALUE.to_string()
    }

    /// Load configuration from a TOML file and apply environment overrides.
    ///
    /// A missing file is not an error: every setting has a default, and a
    /// deployment may configure the service through the environment alone.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    /// `load` with an explicit override lookup, for tests.
    fn load_with<P, F>(path: P, get: F) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => return Err(ConfigError::Io(err)),
        };

        config.apply_overrides(get)?;
        config.validate()?;

        Ok(config)
    }

    /// Apply `PORT`, `DATABASE_URL` and `GIT_COMMIT` overrides.
    ///
    /// The lookup is passed as a function so tests can inject values without
    /// mutating process-global environment.
    pub fn apply_overrides<F>(&mut self, get: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = get("PORT") {
            self.http.port = port.parse().map_err(|_| {
                ConfigError::Validation(format!("PORT must be a port number, got {port:?}"))
            })?;
        }
        if let Some(url) = get("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(commit) = get("GIT_COMMIT") {
            self.git_commit = commit;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.health_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "database.health_timeout_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        3000
    }
}

/// Database pool and health-probe configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection string
    #[serde(default = "DatabaseConfig::default_url")]
    pub url: String,
    /// Maximum pooled connections (default: 5)
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
    /// How long a pool acquire may wait for a connection, in milliseconds
    #[serde(default = "DatabaseConfig::default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
    /// Deadline for the health-check ping, in milliseconds
    #[serde(default = "DatabaseConfig::default_health_timeout_ms")]
    pub health_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
            max_connections: Self::default_max_connections(),
            acquire_timeout_ms: Self::default_acquire_timeout_ms(),
            health_timeout_ms: Self::default_health_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    fn default_url() -> String {
        "postgres://localhost:5432/colada".to_string()
    }

    fn default_max_connections() -> u32 {
        5
    }

    fn default_acquire_timeout_ms() -> u64 {
        3000
    }

    fn default_health_timeout_ms() -> u64 {
        DEFAULT_CHECK_TIMEOUT.as_millis() as u64
    }

    /// Effective pool acquire timeout
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }

    /// Effective health-check deadline
    pub fn health_timeout(&self) -> Duration {
        Duration::from_millis(self.health_timeout_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
