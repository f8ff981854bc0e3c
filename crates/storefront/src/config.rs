//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MEDUSA_BACKEND_URL` - Medusa backend base URL (e.g., <https://api.merocloset.com>)
//! - `MEDUSA_PUBLISHABLE_KEY` - Medusa Store API publishable key
//! - `MEDUSA_REGION_HINT` - Substring preferred in region names (default: gulf)
//! - `MEDUSA_DEFAULT_CURRENCY` - Preferred region currency (default: bhd)
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//!
//! `MEDUSA_BACKEND_URL` and `MEDUSA_PUBLISHABLE_KEY` are required for the
//! store to serve real data, but their absence is not a startup failure:
//! every backend call degrades to an empty result so page rendering still
//! works against an unconfigured or unseeded backend.

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Medusa Store API configuration
    pub medusa: MedusaConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Medusa Store API configuration.
///
/// Implements `Debug` manually to redact the publishable key.
#[derive(Clone)]
pub struct MedusaConfig {
    /// Backend base URL, validated, without trailing slash
    pub backend_url: Option<String>,
    /// Store API publishable key (sent as `x-publishable-api-key`)
    pub publishable_key: Option<SecretString>,
    /// Substring preferred in region names (e.g., "gulf")
    pub region_name_hint: String,
    /// Currency preferred when no region name matches (e.g., "bhd")
    pub default_currency: String,
}

impl std::fmt::Debug for MedusaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MedusaConfig")
            .field("backend_url", &self.backend_url)
            .field(
                "publishable_key",
                &self.publishable_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("region_name_hint", &self.region_name_hint)
            .field("default_currency", &self.default_currency)
            .finish()
    }
}

impl MedusaConfig {
    /// The Store API base (`{backend_url}/store`), when configured.
    #[must_use]
    pub fn store_base(&self) -> Option<String> {
        self.backend_url
            .as_ref()
            .map(|url| format!("{}/store", url.trim_end_matches('/')))
    }

    fn from_env() -> Self {
        let backend_url = get_optional_env("MEDUSA_BACKEND_URL").and_then(|raw| {
            match Url::parse(&raw) {
                Ok(_) => Some(raw.trim_end_matches('/').to_string()),
                Err(e) => {
                    tracing::warn!(error = %e, "MEDUSA_BACKEND_URL is not a valid URL; ignoring");
                    None
                }
            }
        });

        Self {
            backend_url,
            publishable_key: get_optional_env("MEDUSA_PUBLISHABLE_KEY").map(SecretString::from),
            region_name_hint: get_env_or_default("MEDUSA_REGION_HINT", "gulf"),
            default_currency: get_env_or_default("MEDUSA_DEFAULT_CURRENCY", "bhd"),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if host or port cannot be parsed. Missing
    /// Medusa variables are not an error (see module docs).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            medusa: MedusaConfig::from_env(),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
        })
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

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_medusa_config() -> MedusaConfig {
        MedusaConfig {
            backend_url: Some("https://api.merocloset.test".to_string()),
            publishable_key: Some(SecretString::from("pk_01HXYZTESTKEY")),
            region_name_hint: "gulf".to_string(),
            default_currency: "bhd".to_string(),
        }
    }

    #[test]
    fn test_store_base_appends_store_path() {
        let config = test_medusa_config();
        assert_eq!(
            config.store_base().unwrap(),
            "https://api.merocloset.test/store"
        );
    }

    #[test]
    fn test_store_base_trims_trailing_slash() {
        let config = MedusaConfig {
            backend_url: Some("https://api.merocloset.test/".to_string()),
            ..test_medusa_config()
        };
        assert_eq!(
            config.store_base().unwrap(),
            "https://api.merocloset.test/store"
        );
    }

    #[test]
    fn test_store_base_none_when_unconfigured() {
        let config = MedusaConfig {
            backend_url: None,
            ..test_medusa_config()
        };
        assert!(config.store_base().is_none());
    }

    #[test]
    fn test_debug_redacts_publishable_key() {
        let config = test_medusa_config();
        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("api.merocloset.test"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("pk_01HXYZTESTKEY"));
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            medusa: test_medusa_config(),
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
