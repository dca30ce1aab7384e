//! OAuth token sets and token endpoint responses.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{AccessToken, RefreshToken};
use crate::error::ConfigError;

/// Access-token lifetime assumed when the token endpoint omits `expires_in`.
pub const DEFAULT_ACCESS_TOKEN_LIFETIME_SECS: i64 = 60 * 60;

/// Lifetime of a refresh token issued by Factorial.
pub const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 7;

/// Default `token_type`.
pub const BEARER: &str = "Bearer";

/// Raw response of the OAuth token endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AccessTokenResponse {
    /// The new access token.
    pub access_token: String,
    /// Token type, usually `Bearer`.
    #[serde(default)]
    pub token_type: Option<String>,
    /// The new refresh token, when rotated.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Access-token lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Issue time as a Unix timestamp.
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl AccessTokenResponse {
    /// Converts the response into a [`TokenSet`].
    ///
    /// Expiry is `created_at + expires_in` (one hour when absent); the
    /// refresh token expires seven days after `created_at`. `created_at`
    /// defaults to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] when the access token is
    /// empty, and [`ConfigError::InvalidTokenLifetime`] when an expiry falls
    /// outside the representable date range.
    pub fn into_token_set(self, now: DateTime<Utc>) -> Result<TokenSet, ConfigError> {
        let created_at = self
            .created_at
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .unwrap_or(now);
        let lifetime = self.expires_in.unwrap_or(DEFAULT_ACCESS_TOKEN_LIFETIME_SECS);
        let refresh_token = self
            .refresh_token
            .filter(|t| !t.trim().is_empty())
            .map(RefreshToken::new)
            .transpose()?;
        let refresh_expires_at = refresh_token
            .as_ref()
            .map(|_| expiry(created_at, REFRESH_TOKEN_LIFETIME_DAYS * 24 * 60 * 60))
            .transpose()?;
        let expires_at = expiry(created_at, lifetime)?;

        Ok(TokenSet {
            access_token: AccessToken::new(self.access_token)?,
            token_type: self
                .token_type
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| BEARER.to_string()),
            refresh_token,
            expires_at: Some(expires_at),
            refresh_expires_at,
            generation: 0,
        })
    }
}

fn expiry(start: DateTime<Utc>, seconds: i64) -> Result<DateTime<Utc>, ConfigError> {
    Duration::try_seconds(seconds)
        .and_then(|lifetime| start.checked_add_signed(lifetime))
        .ok_or(ConfigError::InvalidTokenLifetime { seconds })
}

/// An access token with its refresh token and expiry times.
///
/// Token sets are immutable snapshots; a refresh produces a new set with a
/// higher `generation`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenSet {
    /// The access token.
    pub access_token: AccessToken,
    /// The token type used in the `Authorization` header.
    pub token_type: String,
    /// The refresh token, if one was issued.
    pub refresh_token: Option<RefreshToken>,
    /// When the access token expires. `None` means unknown.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the refresh token expires. `None` means unknown.
    pub refresh_expires_at: Option<DateTime<Utc>>,
    pub(crate) generation: u64,
}

impl TokenSet {
    /// Creates a bearer token set.
    #[must_use]
    pub fn new(
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            access_token,
            token_type: BEARER.to_string(),
            refresh_token,
            expires_at,
            refresh_expires_at: None,
            generation: 0,
        }
    }

    /// Sets the refresh-token expiry.
    #[must_use]
    pub const fn with_refresh_expiry(mut self, at: DateTime<Utc>) -> Self {
        self.refresh_expires_at = Some(at);
        self
    }

    /// Returns how many refreshes produced this set.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `true` if the access token has expired at `now`.
    ///
    /// An unknown expiry counts as expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |expires_at| now >= expires_at)
    }

    /// Returns `true` if the access token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Returns `true` if the refresh token is known to have expired at `now`.
    #[must_use]
    pub fn refresh_token_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.refresh_expires_at.is_some_and(|at| now >= at)
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token.as_ref())
    }
}

// Verify TokenSet is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenSet>();
};
