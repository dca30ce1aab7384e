//! Factorial API version definitions.
//!
//! Factorial versions its public API by release date. The version is part of
//! every resource URL: `/api/{version}/resources/...`.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Factorial API version.
///
/// # Example
///
/// ```rust
/// use factorialhr::ApiVersion;
///
/// let version = ApiVersion::latest();
/// assert!(version.is_stable());
///
/// let version: ApiVersion = "2025-04-01".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2025_04_01);
/// assert_eq!(version.to_string(), "2025-04-01");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 2025-01-01
    V2025_01_01,
    /// API version 2025-04-01
    V2025_04_01,
    /// API version 2025-07-01
    V2025_07_01,
    /// API version 2025-10-01
    V2025_10_01,
    /// A dated version this crate does not know about yet.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest known API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2025_10_01
    }

    /// Returns `true` for versions this crate was built against.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Returns all known versions, oldest first.
    #[must_use]
    pub fn known_versions() -> Vec<Self> {
        vec![
            Self::V2025_01_01,
            Self::V2025_04_01,
            Self::V2025_07_01,
            Self::V2025_10_01,
        ]
    }

    /// Returns the `YYYY-MM-DD` form used in URLs.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::V2025_01_01 => "2025-01-01",
            Self::V2025_04_01 => "2025-04-01",
            Self::V2025_07_01 => "2025-07-01",
            Self::V2025_10_01 => "2025-10-01",
            Self::Custom(s) => s,
        }
    }

    fn is_valid_version_format(s: &str) -> bool {
        // YYYY-MM-DD
        let parts: Vec<&str> = s.split('-').collect();
        let [year, month, day] = parts.as_slice() else {
            return false;
        };
        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return false;
        }
        if !parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())) {
            return false;
        }
        matches!(month.parse::<u8>(), Ok(1..=12)) && matches!(day.parse::<u8>(), Ok(1..=31))
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // ISO dates sort lexicographically; a known variant sorts after a
        // custom spelling of the same date
        self.as_str()
            .cmp(other.as_str())
            .then_with(|| self.is_stable().cmp(&other.is_stable()))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "2025-01-01" => Ok(Self::V2025_01_01),
            "2025-04-01" => Ok(Self::V2025_04_01),
            "2025-07-01" => Ok(Self::V2025_07_01),
            "2025-10-01" => Ok(Self::V2025_10_01),
            _ if Self::is_valid_version_format(s) => Ok(Self::Custom(s.to_string())),
            _ => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_version_parses_known_versions() {
        assert_eq!(
            "2025-01-01".parse::<ApiVersion>().unwrap(),
            ApiVersion::V2025_01_01
        );
        assert_eq!(
            "2025-10-01".parse::<ApiVersion>().unwrap(),
            ApiVersion::V2025_10_01
        );
    }

    #[test]
    fn test_api_version_parses_future_versions_as_custom() {
        let version: ApiVersion = "2026-01-01".parse().unwrap();
        assert_eq!(version, ApiVersion::Custom("2026-01-01".to_string()));
        assert!(!version.is_stable());
        assert!(version > ApiVersion::latest());
    }

    #[test]
    fn test_api_version_rejects_malformed_strings() {
        assert!("2025-10".parse::<ApiVersion>().is_err());
        assert!("unstable".parse::<ApiVersion>().is_err());
        assert!("2025-13-01".parse::<ApiVersion>().is_err());
        assert!("25-01-01".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_api_version_ordering_is_chronological() {
        assert!(ApiVersion::V2025_01_01 < ApiVersion::V2025_04_01);
        assert!(ApiVersion::V2025_07_01 < ApiVersion::V2025_10_01);
        let versions = ApiVersion::known_versions();
        let mut sorted = versions.clone();
        sorted.sort();
        assert_eq!(versions, sorted);
    }

    #[test]
    fn test_past_custom_version_sorts_before_known_versions() {
        let past: ApiVersion = "2024-01-01".parse().unwrap();
        assert!(past < ApiVersion::V2025_01_01);
        assert!(past < ApiVersion::V2025_10_01);

        let between: ApiVersion = "2025-05-15".parse().unwrap();
        assert!(between > ApiVersion::V2025_04_01);
        assert!(between < ApiVersion::V2025_07_01);
    }

    #[test]
    fn test_api_version_display_round_trips() {
        for version in ApiVersion::known_versions() {
            let parsed: ApiVersion = version.to_string().parse().unwrap();
            assert_eq!(parsed, version);
        }
    }
}
