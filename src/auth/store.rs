//! Persistence of refreshable credentials to a JSON file.
//!
//! The file holds everything needed to resume a session:
//!
//! ```json
//! {
//!   "access_token": "...",
//!   "refresh_token": "...",
//!   "token_type": "Bearer",
//!   "expires_at": "2025-03-01T13:00:00Z",
//!   "refresh_expires_at": "2025-03-08T12:00:00Z",
//!   "client_id": "...",
//!   "client_secret": "...",
//!   "base_url": "https://api.factorialhr.com"
//! }
//! ```
//!
//! `refresh_expires_at` and `base_url` are optional.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::token::{TokenSet, BEARER};
use crate::config::{AccessToken, BaseUrl, ClientId, ClientSecret, RefreshToken};
use crate::error::ConfigError;

/// On-disk shape of a refreshable credential.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CredentialFile {
    /// The access token.
    pub access_token: AccessToken,
    /// The refresh token.
    pub refresh_token: RefreshToken,
    /// Token type; `Bearer` when absent.
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Access-token expiry.
    pub expires_at: DateTime<Utc>,
    /// Refresh-token expiry, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_expires_at: Option<DateTime<Utc>>,
    /// OAuth client id.
    pub client_id: ClientId,
    /// OAuth client secret.
    pub client_secret: ClientSecret,
    /// API host the tokens belong to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<BaseUrl>,
}

fn default_token_type() -> String {
    BEARER.to_string()
}

impl CredentialFile {
    /// Returns the token set stored in the file.
    #[must_use]
    pub fn token_set(&self) -> TokenSet {
        TokenSet {
            access_token: self.access_token.clone(),
            token_type: self.token_type.clone(),
            refresh_token: Some(self.refresh_token.clone()),
            expires_at: Some(self.expires_at),
            refresh_expires_at: self.refresh_expires_at,
            generation: 0,
        }
    }

    /// Reads and validates a credential file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CredentialFileUnreadable`] when the file cannot
    /// be read and [`ConfigError::InvalidCredentialFile`] when it is not
    /// valid JSON or misses a required field.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            ConfigError::CredentialFileUnreadable {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        serde_json::from_str(&contents).map_err(|e| ConfigError::InvalidCredentialFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Writes the file, replacing any previous contents.
    ///
    /// The data is written to a sibling temporary file first and renamed
    /// into place, so readers never observe a half-written file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CredentialFileUnwritable`] on I/O failure.
    pub async fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let unwritable = |message: String| ConfigError::CredentialFileUnwritable {
            path: path.to_path_buf(),
            message,
        };

        let json = serde_json::to_string_pretty(self).map_err(|e| unwritable(e.to_string()))?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| unwritable(e.to_string()))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| unwritable(e.to_string()))
    }
}
