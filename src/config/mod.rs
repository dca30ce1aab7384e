//! Configuration types for the FactorialHR client.
//!
//! # Overview
//!
//! - [`FactorialConfig`]: settings shared by every request (base URL, API
//!   version, timeout, page size)
//! - [`FactorialConfigBuilder`]: a builder for [`FactorialConfig`]
//! - [`ApiKey`], [`ClientId`], [`ClientSecret`], [`AccessToken`],
//!   [`RefreshToken`]: validated secret newtypes
//! - [`BaseUrl`]: a validated API host
//! - [`ApiVersion`]: the dated API version to target
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use factorialhr::{ApiVersion, BaseUrl, FactorialConfig};
//!
//! let config = FactorialConfig::builder()
//!     .base_url(BaseUrl::new("https://api.demo.factorial.dev").unwrap())
//!     .api_version(ApiVersion::V2025_07_01)
//!     .timeout(Duration::from_secs(10))
//!     .page_size(50)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     config.resource_url("employees/employees"),
//!     "https://api.demo.factorial.dev/api/2025-07-01/resources/employees/employees"
//! );
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, ApiKey, BaseUrl, ClientId, ClientSecret, RefreshToken};
pub use version::ApiVersion;

use crate::error::ConfigError;
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration shared by every request.
///
/// Credentials are not part of the configuration; they are passed to
/// [`RestClient`](crate::clients::RestClient) separately so one credential
/// can be shared between clients.
#[derive(Clone, Debug)]
pub struct FactorialConfig {
    base_url: BaseUrl,
    api_version: ApiVersion,
    user_agent_prefix: Option<String>,
    timeout: Duration,
    page_size: Option<u32>,
}

impl FactorialConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> FactorialConfigBuilder {
        FactorialConfigBuilder::new()
    }

    /// Returns the API host.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the API version used in resource URLs.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the User-Agent prefix, if any.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the `limit` applied to paginated listings, if any.
    #[must_use]
    pub const fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    /// Returns the full URL of a resource path.
    #[must_use]
    pub fn resource_url(&self, path: &str) -> String {
        self.base_url.join(&format!(
            "api/{}/resources/{}",
            self.api_version,
            path.trim_matches('/')
        ))
    }

    /// Returns the OAuth token endpoint for this host.
    #[must_use]
    pub fn token_url(&self) -> String {
        self.base_url.join("oauth/token")
    }
}

impl Default for FactorialConfig {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::default(),
            api_version: ApiVersion::latest(),
            user_agent_prefix: None,
            timeout: DEFAULT_TIMEOUT,
            page_size: None,
        }
    }
}

// Verify FactorialConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FactorialConfig>();
};

/// Builder for [`FactorialConfig`].
///
/// Every field is optional; unset fields take the defaults of
/// [`FactorialConfig::default`].
#[derive(Debug, Default)]
pub struct FactorialConfigBuilder {
    base_url: Option<BaseUrl>,
    api_version: Option<ApiVersion>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    page_size: Option<u32>,
}

impl FactorialConfigBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API host.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets a prefix prepended to the User-Agent header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the `limit` query parameter used when fetching every page.
    #[must_use]
    pub const fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPageSize`] for a zero page size and
    /// [`ConfigError::ZeroTimeout`] for a zero timeout.
    pub fn build(self) -> Result<FactorialConfig, ConfigError> {
        if let Some(size) = self.page_size.filter(|size| *size == 0) {
            return Err(ConfigError::InvalidPageSize { size });
        }
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(FactorialConfig {
            base_url: self.base_url.unwrap_or_default(),
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            user_agent_prefix: self.user_agent_prefix,
            timeout,
            page_size: self.page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = FactorialConfig::builder().build().unwrap();

        assert_eq!(config.base_url().as_ref(), "https://api.factorialhr.com");
        assert_eq!(config.api_version(), &ApiVersion::latest());
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert!(config.page_size().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_rejects_zero_page_size() {
        let result = FactorialConfig::builder().page_size(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPageSize { size: 0 })
        ));
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        let result = FactorialConfig::builder()
            .timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn test_resource_url_includes_version_and_trims_slashes() {
        let config = FactorialConfig::builder()
            .api_version(ApiVersion::V2025_01_01)
            .build()
            .unwrap();
        assert_eq!(
            config.resource_url("/teams/teams/"),
            "https://api.factorialhr.com/api/2025-01-01/resources/teams/teams"
        );
    }

    #[test]
    fn test_token_url_is_on_base_host() {
        let config = FactorialConfig::builder()
            .base_url(BaseUrl::new("http://localhost:9000/").unwrap())
            .build()
            .unwrap();
        assert_eq!(config.token_url(), "http://localhost:9000/oauth/token");
    }

    #[test]
    fn test_config_is_clone_and_debug() {
        let config = FactorialConfig::builder()
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let cloned = config.clone();
        assert_eq!(cloned.user_agent_prefix(), Some("MyApp/1.0"));
        assert!(format!("{:?}", config).contains("FactorialConfig"));
    }
}
