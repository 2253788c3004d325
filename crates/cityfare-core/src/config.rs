//! Environment-sourced configuration.
//!
//! All settings come from the process environment. The API key is required
//! and its absence fails startup; everything else has a default.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;
use url::Url;

/// Base URL of the external city catalog / weather forecast API.
const DEFAULT_UPSTREAM_URL: &str = "https://api-ugi2pflmha-ew.a.run.app";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Configuration errors. All of these abort startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

impl ConfigError {
    fn invalid(var: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            message: message.into(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential forwarded to the upstream services as the `apiKey` query
    /// parameter.
    pub api_key: String,

    /// Address the API listener binds to.
    pub host: IpAddr,

    /// Port the API listener binds to.
    pub port: u16,

    /// Base URL of the upstream city/weather API.
    pub upstream_url: Url,

    /// Per-request timeout for upstream calls, in seconds.
    pub upstream_timeout_secs: u64,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingVar` if `API_KEY` is absent or blank,
    /// and `ConfigError::Invalid` for unparseable values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = get("API_KEY")
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingVar("API_KEY"))?;

        let host = match get("HOST") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::invalid("HOST", format!("not an IP address: {}", raw)))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::invalid("PORT", format!("not a port number: {}", raw)))?,
            None => DEFAULT_PORT,
        };

        let upstream_url = validate_base_url(
            &get("UPSTREAM_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
        )?;

        let upstream_timeout_secs = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| {
                ConfigError::invalid(
                    "UPSTREAM_TIMEOUT_SECS",
                    format!("not a number of seconds: {}", raw),
                )
            })?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };
        if upstream_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "UPSTREAM_TIMEOUT_SECS",
                "timeout must be greater than 0",
            ));
        }

        Ok(Self {
            api_key,
            host,
            port,
            upstream_url,
            upstream_timeout_secs,
        })
    }

    /// The socket address the API listener binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Validate an upstream base URL.
fn validate_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::invalid("UPSTREAM_URL", format!("invalid URL: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::invalid(
            "UPSTREAM_URL",
            format!("URL must use http or https scheme, got: {}", url.scheme()),
        ));
    }

    if url.host().is_none() {
        return Err(ConfigError::invalid("UPSTREAM_URL", "URL must have a host"));
    }

    Ok(url)
}
