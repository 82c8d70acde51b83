//! # Service Configuration Module
//!
//! Provides configuration management for the duration service.
//!
//! ## Overview
//!
//! [`ServiceConfig`] holds every tunable of the process: listen address,
//! outbound fetch behaviour and logging. It can be assembled in code with
//! [`ServiceConfig::builder`] or loaded from layered sources with
//! [`ServiceConfig::load`]. Both paths end in [`ServiceConfig::validate`], so
//! an invalid setting fails at startup instead of on the first request.
//!
//! ## Sources
//!
//! Lowest to highest precedence:
//!
//! 1. Built-in defaults
//! 2. Optional TOML file named by `MP3_DURATION_CONFIG`
//! 3. Environment variables prefixed `MP3_DURATION_` (e.g. `MP3_DURATION_BIND_ADDR`)
//!
//! ## Usage
//!
//! ```no_run
//! use core_runtime::config::ServiceConfig;
//!
//! let config = ServiceConfig::builder()
//!     .bind_addr("127.0.0.1:8080")
//!     .fetch_timeout_secs(15)
//!     .build()
//!     .expect("Failed to build config");
//! ```

use crate::error::{Error, Result};
use crate::logging::{LogFormat, LogLevel, LoggingConfig};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix for configuration keys
pub const ENV_PREFIX: &str = "MP3_DURATION";

/// Environment variable naming an optional TOML config file
pub const CONFIG_PATH_ENV: &str = "MP3_DURATION_CONFIG";

/// Service configuration.
///
/// Use [`ServiceConfigBuilder`] or [`ServiceConfig::load`] to construct
/// validated instances.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listen address, `host:port`
    pub bind_addr: String,

    /// User-Agent header sent with the outbound fetch
    pub user_agent: String,

    /// Whole-request timeout for the outbound fetch in seconds (0 disables)
    pub fetch_timeout_secs: u64,

    /// Connect timeout for the outbound fetch in seconds
    pub connect_timeout_secs: u64,

    /// Optional cap on the buffered response body
    pub max_body_bytes: Option<u64>,

    /// Minimum log level
    pub log_level: LogLevel,

    /// Log output format
    pub log_format: LogFormat,

    /// Raw `EnvFilter` directive overriding `log_level`
    pub log_filter: Option<String>,

    /// Strip credentials and query strings from logged URLs
    pub redact_urls: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            user_agent: "MP3-Duration-API/1.0".to_string(),
            fetch_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_body_bytes: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::default(),
            log_filter: None,
            redact_urls: true,
        }
    }
}

impl ServiceConfig {
    /// Creates a new builder for constructing a `ServiceConfig`.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Load configuration from the process environment.
    ///
    /// Reads the optional TOML file named by `MP3_DURATION_CONFIG`, then
    /// applies `MP3_DURATION_*` environment variables on top.
    pub fn load() -> Result<Self> {
        let path = env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from(path.as_deref(), None)
    }

    /// Load configuration from explicit sources.
    ///
    /// `env_overrides` replaces the process environment when provided, which
    /// keeps tests independent of the real environment. Keys use the same
    /// `MP3_DURATION_*` names as the environment.
    pub fn load_from(
        path: Option<&Path>,
        env_overrides: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(env_overrides),
        );

        let config: ServiceConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Bind address parses as `host:port`
    /// - User agent is not empty
    /// - Connect timeout is between 1 and 300 seconds
    /// - Body cap, when set, is greater than zero
    /// - Custom log filter, when set, is not empty
    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;

        if self.user_agent.trim().is_empty() {
            return Err(Error::Config("User agent cannot be empty".to_string()));
        }

        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 300 {
            return Err(Error::Config(
                "Connect timeout must be between 1 and 300 seconds".to_string(),
            ));
        }

        if self.max_body_bytes == Some(0) {
            return Err(Error::Config(
                "Body size limit must be greater than 0 bytes".to_string(),
            ));
        }

        if self
            .log_filter
            .as_deref()
            .is_some_and(|filter| filter.trim().is_empty())
        {
            return Err(Error::Config("Log filter cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Parsed listen address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_addr.parse().map_err(|e| {
            Error::Config(format!("Invalid bind address '{}': {}", self.bind_addr, e))
        })
    }

    /// Outbound fetch timeout, `None` when disabled
    pub fn fetch_timeout(&self) -> Option<Duration> {
        (self.fetch_timeout_secs > 0).then(|| Duration::from_secs(self.fetch_timeout_secs))
    }

    /// Outbound connect timeout
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Logging settings derived from this configuration
    pub fn logging(&self) -> LoggingConfig {
        let config = LoggingConfig::default()
            .with_format(self.log_format)
            .with_level(self.log_level);

        match &self.log_filter {
            Some(filter) => config.with_filter(filter.clone()),
            None => config,
        }
    }
}

/// Builder for constructing [`ServiceConfig`] instances.
///
/// Unset fields keep their defaults. [`build()`](ServiceConfigBuilder::build)
/// validates the result.
#[derive(Debug, Default)]
pub struct ServiceConfigBuilder {
    bind_addr: Option<String>,
    user_agent: Option<String>,
    fetch_timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
    max_body_bytes: Option<u64>,
    log_level: Option<LogLevel>,
    log_format: Option<LogFormat>,
    log_filter: Option<String>,
    redact_urls: Option<bool>,
}

impl ServiceConfigBuilder {
    /// Sets the listen address (`host:port`).
    pub fn bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = Some(addr.into());
        self
    }

    /// Sets the outbound User-Agent header.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Sets the outbound fetch timeout in seconds; `0` disables it.
    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = Some(secs);
        self
    }

    /// Sets the outbound connect timeout in seconds.
    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = Some(secs);
        self
    }

    /// Caps the buffered response body.
    pub fn max_body_bytes(mut self, limit: u64) -> Self {
        self.max_body_bytes = Some(limit);
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.log_format = Some(format);
        self
    }

    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    pub fn redact_urls(mut self, redact: bool) -> Self {
        self.redact_urls = Some(redact);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when any value fails validation.
    pub fn build(self) -> Result<ServiceConfig> {
        let defaults = ServiceConfig::default();

        let config = ServiceConfig {
            bind_addr: self.bind_addr.unwrap_or(defaults.bind_addr),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            fetch_timeout_secs: self
                .fetch_timeout_secs
                .unwrap_or(defaults.fetch_timeout_secs),
            connect_timeout_secs: self
                .connect_timeout_secs
                .unwrap_or(defaults.connect_timeout_secs),
            max_body_bytes: self.max_body_bytes.or(defaults.max_body_bytes),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            log_format: self.log_format.unwrap_or(defaults.log_format),
            log_filter: self.log_filter.or(defaults.log_filter),
            redact_urls: self.redact_urls.unwrap_or(defaults.redact_urls),
        };

        config.validate()?;
        Ok(config)
    }
}
