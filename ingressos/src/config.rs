//! Configuration management for the ticket service.
//!
//! Loads configuration from environment variables with defaults that match
//! the documented behavior: `127.0.0.1:5000`, no body size limit, and a
//! version 1 / level L / 10px / 4-module QR code.

use crate::qr::{ErrorCorrection, QrOptions, MAX_VERSION};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("invalid value `{value}` for {key}: {reason}")]
    Invalid {
        /// Environment variable name
        key: &'static str,
        /// Raw value found
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// QR encoder configuration
    pub qr: QrOptions,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Maximum request body size in bytes (`None` = unlimited)
    pub max_body_bytes: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_body_bytes: None,
        }
    }
}

impl ServerConfig {
    /// `host:port` string to bind the listener to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to a malformed value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to a malformed value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server = ServerConfig {
            host: lookup("HOST").unwrap_or(defaults.server.host),
            port: parse(&lookup, "PORT")?.unwrap_or(defaults.server.port),
            max_body_bytes: parse(&lookup, "MAX_BODY_BYTES")?,
        };

        let version: i16 = parse(&lookup, "QR_VERSION")?.unwrap_or(defaults.qr.version);
        if !(1..=MAX_VERSION).contains(&version) {
            return Err(ConfigError::Invalid {
                key: "QR_VERSION",
                value: version.to_string(),
                reason: format!("must be between 1 and {MAX_VERSION}"),
            });
        }

        let box_size: u32 = parse(&lookup, "QR_BOX_SIZE")?.unwrap_or(defaults.qr.box_size);
        if box_size == 0 {
            return Err(ConfigError::Invalid {
                key: "QR_BOX_SIZE",
                value: box_size.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let qr = QrOptions {
            version,
            error_correction: parse::<ErrorCorrection, _>(&lookup, "QR_ERROR_CORRECTION")?
                .unwrap_or(defaults.qr.error_correction),
            box_size,
            border: parse(&lookup, "QR_BORDER")?.unwrap_or(defaults.qr.border),
            fit: parse(&lookup, "QR_FIT")?.unwrap_or(defaults.qr.fit),
        };

        Ok(Self { server, qr })
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.server.max_body_bytes, None);
        assert_eq!(config.qr, QrOptions::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("MAX_BODY_BYTES", "1048576"),
            ("QR_VERSION", "5"),
            ("QR_ERROR_CORRECTION", "h"),
            ("QR_BOX_SIZE", "4"),
            ("QR_BORDER", "2"),
            ("QR_FIT", "false"),
        ]))
        .unwrap();

        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.server.max_body_bytes, Some(1_048_576));
        assert_eq!(
            config.qr,
            QrOptions {
                version: 5,
                error_correction: ErrorCorrection::H,
                box_size: 4,
                border: 2,
                fit: false,
            }
        );
    }

    #[test]
    fn test_malformed_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn test_version_out_of_range() {
        let err = Config::from_lookup(lookup(&[("QR_VERSION", "41")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "QR_VERSION", .. }));
    }

    #[test]
    fn test_zero_box_size_rejected() {
        let err = Config::from_lookup(lookup(&[("QR_BOX_SIZE", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "QR_BOX_SIZE", .. }));
    }
}
