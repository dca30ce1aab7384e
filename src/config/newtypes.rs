//! Validated newtype wrappers for configuration values and secrets.
//!
//! Every wrapper validates its contents on construction. Secret-bearing
//! wrappers mask their value in `Debug` output so they can be logged
//! alongside other configuration without leaking.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Declares a non-empty secret string newtype with a masked `Debug`.
macro_rules! secret_newtype {
    ($(#[$meta:meta])* $name:ident, $err:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            /// Creates a new validated value.
            ///
            /// # Errors
            ///
            #[doc = concat!("Returns [`ConfigError::", stringify!($err), "`] if the value is empty.")]
            pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ConfigError::$err);
                }
                Ok(Self(value))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(*****)"))
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::new(s).map_err(de::Error::custom)
            }
        }
    };
}

secret_newtype!(
    /// A Factorial API key, sent in the `x-api-key` header.
    ///
    /// # Example
    ///
    /// ```rust
    /// use factorialhr::ApiKey;
    ///
    /// let key = ApiKey::new("my-api-key").unwrap();
    /// assert_eq!(key.as_ref(), "my-api-key");
    /// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
    /// ```
    ApiKey,
    EmptyApiKey
);

secret_newtype!(
    /// An OAuth client secret.
    ClientSecret,
    EmptyClientSecret
);

secret_newtype!(
    /// An OAuth access token.
    AccessToken,
    EmptyAccessToken
);

secret_newtype!(
    /// An OAuth refresh token.
    RefreshToken,
    EmptyRefreshToken
);

/// An OAuth client id.
///
/// Client ids are not secret, so `Debug` shows the value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientId`] if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConfigError::EmptyClientId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ClientId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated API base URL such as `https://api.factorialhr.com`.
///
/// Trailing slashes are stripped so paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use factorialhr::BaseUrl;
///
/// let url = BaseUrl::new("https://api.demo.factorial.dev/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.demo.factorial.dev");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "api.demo.factorial.dev");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// The production Factorial API host.
    pub const DEFAULT: &'static str = "https://api.factorialhr.com";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no `http` or
    /// `https` scheme, has no host, or carries a query string or fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidBaseUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        if remainder.contains(['?', '#']) {
            return Err(invalid());
        }

        let host_end = remainder
            .find([':', '/'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name without port or path.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Joins a path onto this base URL with exactly one separating slash.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        let url = Self::DEFAULT.to_string();
        Self {
            scheme_end: 5,
            host_start: 8,
            host_end: url.len(),
            url,
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
