//! Endpoint configuration for userlist clients.
//!
//! [`UserListConfig`] names the backend, the collection path filters are
//! appended to, and the request timeout. It is serde-friendly so it can be
//! loaded from a file and is checked with `validator` before use.

use crate::client::{ClientConfig, USERS_DEFAULT_TIMEOUT};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Default collection path of the user API.
pub const DEFAULT_API_PATH: &str = "/api/users";

/// Configuration for a userlist client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct UserListConfig {
    /// Backend base URL
    #[validate(url)]
    pub base_url: String,

    /// Path of the user collection, relative to the base URL
    #[validate(length(min = 1))]
    #[serde(default = "default_api_path")]
    pub api_path: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_path() -> String {
    DEFAULT_API_PATH.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    USERS_DEFAULT_TIMEOUT
}

impl UserListConfig {
    /// Create a new configuration for the given backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            base_url: base_url.into(),
            api_path: default_api_path(),
            request_timeout_secs: default_request_timeout_secs(),
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set the collection path.
    #[must_use]
    pub fn with_api_path(mut self, path: impl Into<String>) -> Self {
        self.api_path = path.into();
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Re-check the configuration after builder overrides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if a field is out of range.
    pub fn validated(self) -> Result<Self, Error> {
        self.validate()?;
        Ok(self)
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// HTTP client configuration derived from this endpoint configuration.
    #[must_use]
    pub const fn client_config(&self) -> ClientConfig {
        ClientConfig::new().with_timeout(self.timeout())
    }

    /// Parse and validate the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::ConfigError(format!("Invalid base URL: {e}")))
    }
}

impl Default for UserListConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4567".to_string(),
            api_path: default_api_path(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = UserListConfig::new("https://users.example.com").unwrap();
        assert_eq!(config.base_url, "https://users.example.com");
        assert_eq!(config.api_path, "/api/users");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_config_invalid_url() {
        let result = UserListConfig::new("not-a-url");
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_config_builder() {
        let config = UserListConfig::new("https://users.example.com")
            .unwrap()
            .with_api_path("/v2/users")
            .with_timeout(5);

        assert_eq!(config.api_path, "/v2/users");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.client_config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_config_default() {
        let config = UserListConfig::default();
        assert_eq!(config.base_url, "http://localhost:4567");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_base_url() {
        let config = UserListConfig::new("https://users.example.com:8080").unwrap();
        let url = config.parse_base_url().unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("users.example.com"));
        assert_eq!(url.port(), Some(8080));
    }

    #[test]
    fn test_config_deserialize_applies_defaults() {
        let config: UserListConfig =
            serde_json::from_str(r#"{"base_url": "http://users.local"}"#).unwrap();
        assert_eq!(config.api_path, DEFAULT_API_PATH);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = UserListConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 301;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 30;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validated_rechecks_overrides() {
        let config = UserListConfig::default().with_timeout(0);
        assert!(matches!(config.validated(), Err(Error::ValidationError(_))));
    }

    #[test]
    fn test_config_validation_empty_path() {
        let mut config = UserListConfig::default();
        config.api_path = String::new();
        assert!(config.validate().is_err());
    }
}
