//! Proxy configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `UPSTREAM_API_BASE_URL` - Base URL of the upstream backend API
//! - `NEXT_PUBLIC_API_BASE_URL` - Legacy name for the same setting, read
//!   when `UPSTREAM_API_BASE_URL` is unset
//! - `PROXY_HOST` - Bind address (default: 127.0.0.1)
//! - `PROXY_PORT` - Listen port (default: 3000)
//! - `PROXY_RATE_LIMIT` - Rate limit sign-in per client IP (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

/// Upstream base URL used when neither variable is set.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "http://localhost:5000/api";

const UPSTREAM_BASE_URL_VAR: &str = "UPSTREAM_API_BASE_URL";
const LEGACY_BASE_URL_VAR: &str = "NEXT_PUBLIC_API_BASE_URL";

/// Variables consulted for the upstream base URL, in precedence order.
const UPSTREAM_BASE_URL_VARS: &[&str] = &[UPSTREAM_BASE_URL_VAR, LEGACY_BASE_URL_VAR];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Proxy application configuration.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Upstream API base URL, without a trailing slash
    pub upstream_base_url: String,
    /// Whether sign-in is rate limited per client IP
    pub rate_limit: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl ProxyConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = parse_or_default(get("PROXY_HOST"), "PROXY_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_or_default(get("PROXY_PORT"), "PROXY_PORT", 3000_u16)?;
        let rate_limit = match get("PROXY_RATE_LIMIT") {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                ConfigError::InvalidEnvVar("PROXY_RATE_LIMIT".to_string(), value.clone())
            })?,
            None => true,
        };

        let upstream_base_url = resolve_upstream_base_url(&get)?;

        Ok(Self {
            host,
            port,
            upstream_base_url,
            rate_limit,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_or_default(
                get("SENTRY_SAMPLE_RATE"),
                "SENTRY_SAMPLE_RATE",
                1.0,
            )?,
            sentry_traces_sample_rate: parse_or_default(
                get("SENTRY_TRACES_SAMPLE_RATE"),
                "SENTRY_TRACES_SAMPLE_RATE",
                0.0,
            )?,
        })
    }

    /// Configuration for a proxy in front of `upstream_base_url`, with every
    /// other setting at its default and rate limiting off.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL is not an absolute http(s) URL.
    pub fn for_upstream(upstream_base_url: &str) -> Result<Self, ConfigError> {
        let mut config = Self::from_lookup(|key| {
            (key == UPSTREAM_BASE_URL_VAR).then(|| upstream_base_url.to_string())
        })?;
        config.rate_limit = false;
        Ok(config)
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Resolve the upstream base URL from the first variable that is set.
///
/// Every handler goes through this one resolver, so there is exactly one
/// default.
fn resolve_upstream_base_url(get: &impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    let (key, raw) = UPSTREAM_BASE_URL_VARS
        .iter()
        .find_map(|key| get(key).map(|value| (*key, value)))
        .unwrap_or((UPSTREAM_BASE_URL_VAR, DEFAULT_UPSTREAM_BASE_URL.to_string()));

    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected an absolute http(s) URL, got {raw}"),
        ));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Parse an optional value, falling back to a default when unset.
fn parse_or_default<T>(value: Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ProxyConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ProxyConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.upstream_base_url, "http://localhost:5000/api");
        assert_eq!(config.port, 3000);
        assert!(config.rate_limit);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_primary_base_url_wins() {
        let config = load(&[
            ("UPSTREAM_API_BASE_URL", "https://api.example.com/v1/"),
            ("NEXT_PUBLIC_API_BASE_URL", "https://legacy.example.com"),
        ])
        .unwrap();
        assert_eq!(config.upstream_base_url, "https://api.example.com/v1");
    }

    #[test]
    fn test_legacy_base_url_fallback() {
        let config = load(&[("NEXT_PUBLIC_API_BASE_URL", "https://legacy.example.com/api")]).unwrap();
        assert_eq!(config.upstream_base_url, "https://legacy.example.com/api");
    }

    #[test]
    fn test_empty_value_is_unset() {
        let config = load(&[
            ("UPSTREAM_API_BASE_URL", "  "),
            ("NEXT_PUBLIC_API_BASE_URL", "https://legacy.example.com"),
        ])
        .unwrap();
        assert_eq!(config.upstream_base_url, "https://legacy.example.com");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = load(&[("UPSTREAM_API_BASE_URL", "ftp://files.example.com")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "UPSTREAM_API_BASE_URL"));

        assert!(load(&[("NEXT_PUBLIC_API_BASE_URL", "not a url")]).is_err());
    }

    #[test]
    fn test_invalid_port() {
        assert!(load(&[("PROXY_PORT", "eighty")]).is_err());
    }

    #[test]
    fn test_rate_limit_flag() {
        assert!(!load(&[("PROXY_RATE_LIMIT", "off")]).unwrap().rate_limit);
        assert!(load(&[("PROXY_RATE_LIMIT", "TRUE")]).unwrap().rate_limit);
        assert!(load(&[("PROXY_RATE_LIMIT", "maybe")]).is_err());
    }

    #[test]
    fn test_for_upstream() {
        let config = ProxyConfig::for_upstream("http://127.0.0.1:9999").unwrap();
        assert_eq!(config.upstream_base_url, "http://127.0.0.1:9999");
        assert!(!config.rate_limit);
    }

    #[test]
    fn test_socket_addr() {
        let config = load(&[("PROXY_HOST", "0.0.0.0"), ("PROXY_PORT", "8080")]).unwrap();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
        assert_eq!(addr.port(), 8080);
    }
}
