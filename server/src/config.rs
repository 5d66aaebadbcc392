//! Runtime configuration read from environment variables.
//!
//!   GLEIF_BASE_URL      upstream registry (default: https://api.gleif.org/api/v1)
//!   GLEIF_TIMEOUT_SECS  upstream request timeout (default: 30)
//!   HOST                bind host (default: 127.0.0.1)
//!   PORT                bind port (default: 8000)

use std::time::Duration;

use gleif_core::{DEFAULT_TIMEOUT, GLEIF_BASE_URL};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: GLEIF_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source. Unset or empty variables
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(url) = get("GLEIF_BASE_URL") {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError {
                    var: "GLEIF_BASE_URL",
                    value: url,
                    reason: "expected an http(s) URL",
                });
            }
            config.base_url = url;
        }
        if let Some(raw) = get("GLEIF_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError {
                        var: "GLEIF_TIMEOUT_SECS",
                        value: raw,
                        reason: "expected a positive number of seconds",
                    })
                }
            }
        }
        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(raw) = get("PORT") {
            config.port = raw.trim().parse().map_err(|_| ConfigError {
                var: "PORT",
                value: raw.clone(),
                reason: "expected a port number",
            })?;
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
