//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults are listed in parentheses.
//!
//! ## Server
//! - `ADMIN_HOST` - Bind address (127.0.0.1)
//! - `ADMIN_PORT` - Listen port (3001)
//! - `ADMIN_BASE_URL` - Public URL; `https://` marks session cookies secure
//!   (<http://localhost:3001>)
//! - `ADMIN_PAGE_SIZE` - Default list page size, one of 10/25/50 (10)
//!
//! ## Mock data
//! - `MOCK_LATENCY_MS` - Simulated network delay per data call (300)
//! - `MOCK_FAILURE_RATE` - Probability (0.0-1.0) that a data call fails (0.0)
//! - `ADMIN_FIXTURES_PATH` - YAML fixture file replacing the built-in dataset
//!
//! ## Observability
//! - `LOG_FORMAT` - `json` or `text` (text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate, 0.0-1.0 (1.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Page sizes the list views accept.
pub const ALLOWED_PAGE_SIZES: [usize; 3] = [10, 25, 50];

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_LATENCY_MS: u64 = 300;
const DEFAULT_PAGE_SIZE: usize = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text (local development).
    #[default]
    Text,
    /// One JSON object per event (log shipping).
    Json,
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin panel
    pub base_url: String,
    /// Default number of rows per list page
    pub page_size: usize,
    /// Mock data simulation settings
    pub mock: MockConfig,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

/// Settings for the simulated backend.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Delay applied to every data call.
    pub latency: Duration,
    /// Probability that a data call fails with a simulated network error.
    pub failure_rate: f64,
    /// Optional YAML fixture file replacing the built-in dataset.
    pub fixtures_path: Option<PathBuf>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            failure_rate: 0.0,
            fixtures_path: None,
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            base_url: format!("http://localhost:{DEFAULT_PORT}"),
            page_size: DEFAULT_PAGE_SIZE,
            mock: MockConfig::default(),
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file first if one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot
    /// be parsed or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = parse_env("ADMIN_HOST")?.unwrap_or(defaults.host);
        let port = parse_env("ADMIN_PORT")?.unwrap_or(defaults.port);
        let base_url = get_optional_env("ADMIN_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"));

        let page_size = parse_env::<usize>("ADMIN_PAGE_SIZE")?.unwrap_or(defaults.page_size);
        if !ALLOWED_PAGE_SIZES.contains(&page_size) {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_PAGE_SIZE".to_string(),
                format!("must be one of {ALLOWED_PAGE_SIZES:?}"),
            ));
        }

        let latency = parse_env::<u64>("MOCK_LATENCY_MS")?
            .map_or(defaults.mock.latency, Duration::from_millis);
        let failure_rate = parse_env::<f64>("MOCK_FAILURE_RATE")?.unwrap_or(0.0);
        validate_rate("MOCK_FAILURE_RATE", failure_rate)?;
        let fixtures_path = get_optional_env("ADMIN_FIXTURES_PATH").map(PathBuf::from);

        let log_format = match get_optional_env("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "LOG_FORMAT".to_string(),
                    format!("expected 'json' or 'text', got '{other}'"),
                ));
            }
        };

        let sentry_sample_rate = parse_env::<f32>("SENTRY_SAMPLE_RATE")?.unwrap_or(1.0);
        validate_rate("SENTRY_SAMPLE_RATE", f64::from(sentry_sample_rate))?;

        Ok(Self {
            host,
            port,
            base_url,
            page_size,
            mock: MockConfig {
                latency,
                failure_rate,
                fixtures_path,
            },
            log_format,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
        })
    }

    /// Get the socket address to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the admin is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}

fn validate_rate(key: &str, rate: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be between 0.0 and 1.0".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdminConfig::default();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3001");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.mock.latency, Duration::from_millis(300));
        assert!(config.mock.fixtures_path.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate("X", 0.0).is_ok());
        assert!(validate_rate("X", 1.0).is_ok());
        assert!(validate_rate("X", 1.5).is_err());
        assert!(validate_rate("X", -0.1).is_err());
    }

    #[test]
    fn test_is_secure() {
        let config = AdminConfig {
            base_url: "https://admin.pressroom.test".to_string(),
            ..AdminConfig::default()
        };
        assert!(config.is_secure());
    }
}
