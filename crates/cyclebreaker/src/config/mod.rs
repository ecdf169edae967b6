use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::matching::MatchOptions;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the decision engine service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub matching: MatchingDefaults,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            matching: MatchingDefaults::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Ranking limits applied when a request leaves them unset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchingDefaults {
    pub top_k: usize,
    pub min_skill_coverage: f64,
}

impl Default for MatchingDefaults {
    fn default() -> Self {
        Self {
            top_k: MatchOptions::DEFAULT_TOP_K,
            min_skill_coverage: MatchOptions::DEFAULT_MIN_SKILL_COVERAGE,
        }
    }
}

impl MatchingDefaults {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let top_k = match env::var("APP_MATCH_TOP_K") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: "APP_MATCH_TOP_K",
                    value: raw,
                })?,
            Err(_) => defaults.top_k,
        };
        if top_k == 0 {
            return Err(ConfigError::ZeroLimit {
                key: "APP_MATCH_TOP_K",
            });
        }

        let min_skill_coverage = match env::var("APP_MIN_SKILL_COVERAGE") {
            Ok(raw) => {
                let value = raw
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::InvalidNumber {
                        key: "APP_MIN_SKILL_COVERAGE",
                        value: raw.clone(),
                    })?;
                if !(0.0..=1.0).contains(&value) {
                    return Err(ConfigError::OutOfRange {
                        key: "APP_MIN_SKILL_COVERAGE",
                        value,
                    });
                }
                value
            }
            Err(_) => defaults.min_skill_coverage,
        };

        Ok(Self {
            top_k,
            min_skill_coverage,
        })
    }

    /// Request options with unset limits taken from these defaults.
    pub fn apply(&self, options: MatchOptions) -> MatchOptions {
        options.or_defaults(self.top_k, self.min_skill_coverage)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str, value: String },
    OutOfRange { key: &'static str, value: f64 },
    ZeroLimit { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a number (found '{value}')")
            }
            ConfigError::OutOfRange { key, value } => {
                write!(f, "{key} must be between 0 and 1 (found {value})")
            }
            ConfigError::ZeroLimit { key } => write!(f, "{key} must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::OutOfRange { .. }
            | ConfigError::ZeroLimit { .. } => None,
        }
    }
}
