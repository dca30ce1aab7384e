//! Credentials attached to every API request.
//!
//! # Overview
//!
//! - [`Credential::api_key`]: a static key sent as `x-api-key`
//! - [`Credential::access_token`]: a static OAuth token
//! - [`Credential::refreshable`]: an OAuth token that renews itself through
//!   the token endpoint, optionally persisted to a file after each refresh
//!
//! # Refresh
//!
//! A [`RefreshableCredential`] keeps its tokens in an immutable
//! [`TokenSet`] snapshot. Readers clone the snapshot and never wait on a
//! refresh. Refreshes are serialized by an async mutex: when several tasks
//! find the token expired at once, the first performs the exchange and the
//! others wait, then reuse its result. Each snapshot carries a generation
//! number so a waiter can tell that the token it saw has already been
//! replaced. A failed exchange is shared the same way: waiters receive the
//! winner's [`AuthError`] instead of trying again.
//!
//! Without an explicit token URL, refreshes go to the [`TokenEndpoint`] of
//! the client making the request, so a client configured for another host
//! never sends its refresh token to production.
//!
//! Cloning a [`Credential`] shares its refresh state; it does not create an
//! independent credential.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::auth::oauth::{refresh_access_token, AuthError, TokenEndpoint};
use crate::auth::store::CredentialFile;
use crate::auth::token::{TokenSet, BEARER};
use crate::clients::Transport;
use crate::config::{AccessToken, ApiKey, BaseUrl, ClientId, ClientSecret, RefreshToken};
use crate::error::ConfigError;

/// Header carrying a static API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying OAuth tokens.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Authentication strategy for API requests.
///
/// # Example
///
/// ```rust
/// use factorialhr::{ApiKey, Credential};
///
/// let credential = Credential::api_key(ApiKey::new("my-key").unwrap());
/// let headers = credential.headers();
/// assert_eq!(headers.get("x-api-key").map(String::as_str), Some("my-key"));
/// assert!(!credential.is_refreshable());
/// ```
#[derive(Clone, Debug)]
pub enum Credential {
    /// A static API key.
    ApiKey(ApiKey),
    /// A static OAuth access token.
    AccessToken {
        /// The token.
        token: AccessToken,
        /// Token type used in the `Authorization` header.
        token_type: String,
    },
    /// A self-refreshing OAuth token, shared by reference.
    Refreshable(Arc<RefreshableCredential>),
}

/// Headers for one attempt, and the token generation they came from.
#[derive(Clone, Debug)]
pub(crate) struct Authorization {
    pub headers: HashMap<String, String>,
    pub generation: Option<u64>,
}

impl Credential {
    /// Creates an API-key credential.
    #[must_use]
    pub const fn api_key(key: ApiKey) -> Self {
        Self::ApiKey(key)
    }

    /// Creates a static bearer-token credential.
    #[must_use]
    pub fn access_token(token: AccessToken) -> Self {
        Self::AccessToken {
            token,
            token_type: BEARER.to_string(),
        }
    }

    /// Wraps a refreshable credential.
    #[must_use]
    pub fn refreshable(credential: RefreshableCredential) -> Self {
        Self::Refreshable(Arc::new(credential))
    }

    /// Returns `true` if this credential can obtain new tokens.
    #[must_use]
    pub const fn is_refreshable(&self) -> bool {
        matches!(self, Self::Refreshable(_))
    }

    /// Returns the headers to merge into a request.
    #[must_use]
    pub fn headers(&self) -> HashMap<String, String> {
        match self {
            Self::ApiKey(key) => {
                HashMap::from([(API_KEY_HEADER.to_string(), key.as_ref().to_string())])
            }
            Self::AccessToken { token, token_type } => HashMap::from([(
                AUTHORIZATION_HEADER.to_string(),
                format!("{token_type} {}", token.as_ref()),
            )]),
            Self::Refreshable(credential) => credential.headers(),
        }
    }

    /// Refreshes the token first if it has expired. A no-op for static
    /// credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when a needed refresh fails.
    pub async fn ensure_valid(&self, transport: &dyn Transport) -> Result<(), AuthError> {
        self.ensure_valid_with(transport, &TokenEndpoint::default())
            .await
    }

    /// Like [`ensure_valid`](Self::ensure_valid), refreshing against
    /// `endpoint` unless the credential names its own token URL.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when a needed refresh fails.
    pub async fn ensure_valid_with(
        &self,
        transport: &dyn Transport,
        endpoint: &TokenEndpoint,
    ) -> Result<(), AuthError> {
        if let Self::Refreshable(credential) = self {
            credential.ensure_valid_with(transport, endpoint).await?;
        }
        Ok(())
    }

    /// Ensures validity and returns the headers for one attempt.
    pub(crate) async fn authorize(
        &self,
        transport: &dyn Transport,
        endpoint: &TokenEndpoint,
    ) -> Result<Authorization, AuthError> {
        match self {
            Self::Refreshable(credential) => {
                let tokens = credential.ensure_valid_with(transport, endpoint).await?;
                Ok(Authorization {
                    headers: token_headers(&tokens),
                    generation: Some(tokens.generation),
                })
            }
            _ => Ok(Authorization {
                headers: self.headers(),
                generation: None,
            }),
        }
    }

    /// Replaces a token the server rejected.
    ///
    /// Returns the new headers, or `None` if this credential cannot refresh.
    pub(crate) async fn reauthorize(
        &self,
        transport: &dyn Transport,
        endpoint: &TokenEndpoint,
        rejected: &Authorization,
    ) -> Result<Option<Authorization>, AuthError> {
        let (Self::Refreshable(credential), Some(generation)) = (self, rejected.generation) else {
            return Ok(None);
        };
        let tokens = credential
            .force_refresh(transport, endpoint, generation)
            .await?;
        Ok(Some(Authorization {
            headers: token_headers(&tokens),
            generation: Some(tokens.generation),
        }))
    }
}

impl From<RefreshableCredential> for Credential {
    fn from(credential: RefreshableCredential) -> Self {
        Self::refreshable(credential)
    }
}

fn token_headers(tokens: &TokenSet) -> HashMap<String, String> {
    HashMap::from([(AUTHORIZATION_HEADER.to_string(), tokens.authorization())])
}

/// An OAuth credential that renews its access token.
///
/// Build one with [`RefreshableCredential::builder`] or load a persisted one
/// with [`RefreshableCredential::from_file`].
#[derive(Debug)]
pub struct RefreshableCredential {
    client_id: ClientId,
    client_secret: ClientSecret,
    base_url: Option<BaseUrl>,
    token_url: Option<String>,
    store: Option<PathBuf>,
    tokens: RwLock<Arc<TokenSet>>,
    // Holds the error of the last finished exchange, if it failed.
    refresh_lock: Mutex<Option<AuthError>>,
    // Incremented whenever an exchange finishes, successfully or not.
    refresh_attempts: AtomicU64,
}

// Verify RefreshableCredential is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RefreshableCredential>();
    assert_send_sync::<Credential>();
};

impl RefreshableCredential {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> RefreshableCredentialBuilder {
        RefreshableCredentialBuilder::default()
    }

    /// Loads a credential persisted by [`save`](Self::save) or by a previous
    /// refresh. Later refreshes are written back to the same file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, malformed, or
    /// misses a required field.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = CredentialFile::load(path).await?;
        tracing::debug!("Loaded credentials from {}", path.display());

        let mut builder = Self::builder()
            .client_id(file.client_id.clone())
            .client_secret(file.client_secret.clone())
            .tokens(file.token_set())
            .store(path);
        if let Some(base_url) = file.base_url {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }

    /// Returns the current token snapshot.
    #[must_use]
    pub fn tokens(&self) -> Arc<TokenSet> {
        Arc::clone(&self.tokens.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Returns the `Authorization` header for the current token.
    #[must_use]
    pub fn headers(&self) -> HashMap<String, String> {
        token_headers(&self.tokens())
    }

    /// Returns the token endpoint URL set on this credential, either
    /// explicitly or through its base URL.
    ///
    /// `None` means refreshes use the endpoint of the calling client.
    #[must_use]
    pub fn token_url(&self) -> Option<&str> {
        self.token_url.as_deref()
    }

    /// Persists every later refresh to `path`.
    #[must_use]
    pub fn with_store(mut self, path: impl Into<PathBuf>) -> Self {
        self.store = Some(path.into());
        self
    }

    /// Returns the persistence path, if any.
    #[must_use]
    pub fn store_path(&self) -> Option<&Path> {
        self.store.as_deref()
    }

    /// Refreshes the token if it has expired, and returns the valid token.
    ///
    /// Without a token URL of its own the credential refreshes against the
    /// production host; see [`ensure_valid_with`](Self::ensure_valid_with).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::RefreshTokenExpired`] when the refresh token
    /// has expired, and [`AuthError::RefreshFailed`] when the exchange fails.
    pub async fn ensure_valid(&self, transport: &dyn Transport) -> Result<Arc<TokenSet>, AuthError> {
        self.ensure_valid_with(transport, &TokenEndpoint::default())
            .await
    }

    /// Refreshes the token if it has expired, using `endpoint` unless the
    /// credential names its own token URL.
    ///
    /// Concurrent callers share a single refresh and its outcome.
    ///
    /// # Errors
    ///
    /// See [`ensure_valid`](Self::ensure_valid).
    pub async fn ensure_valid_with(
        &self,
        transport: &dyn Transport,
        endpoint: &TokenEndpoint,
    ) -> Result<Arc<TokenSet>, AuthError> {
        let current = self.tokens();
        if !current.is_expired() {
            return Ok(current);
        }
        tracing::debug!(generation = current.generation, "Access token expired");
        self.refresh_from(transport, endpoint, current.generation)
            .await
    }

    /// Refreshes the token regardless of its expiry, unless a refresh has
    /// already replaced the token of generation `stale_generation`.
    ///
    /// # Errors
    ///
    /// See [`ensure_valid`](Self::ensure_valid).
    pub async fn force_refresh(
        &self,
        transport: &dyn Transport,
        endpoint: &TokenEndpoint,
        stale_generation: u64,
    ) -> Result<Arc<TokenSet>, AuthError> {
        self.refresh_from(transport, endpoint, stale_generation)
            .await
    }

    /// Writes the current tokens to the persistence file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] when no file was
    /// configured and [`ConfigError::CredentialFileUnwritable`] on I/O
    /// failure.
    pub async fn save(&self) -> Result<(), ConfigError> {
        let path = self
            .store
            .as_deref()
            .ok_or(ConfigError::MissingRequiredField { field: "store" })?;
        self.save_to(path).await
    }

    /// Writes the current tokens to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CredentialFileUnwritable`] on I/O failure and
    /// [`ConfigError::EmptyRefreshToken`] when there is no refresh token to
    /// store.
    pub async fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let file = self.to_file(&self.tokens())?;
        file.save(path).await
    }

    fn to_file(&self, tokens: &TokenSet) -> Result<CredentialFile, ConfigError> {
        Ok(CredentialFile {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens
                .refresh_token
                .clone()
                .ok_or(ConfigError::EmptyRefreshToken)?,
            token_type: tokens.token_type.clone(),
            expires_at: tokens.expires_at.unwrap_or_else(Utc::now),
            refresh_expires_at: tokens.refresh_expires_at,
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            base_url: self.base_url.clone(),
        })
    }

    async fn refresh_from(
        &self,
        transport: &dyn Transport,
        endpoint: &TokenEndpoint,
        stale_generation: u64,
    ) -> Result<Arc<TokenSet>, AuthError> {
        let attempts_seen = self.refresh_attempts.load(Ordering::Acquire);
        // Released on drop, including when the caller's future is cancelled.
        let mut last_failure = self.refresh_lock.lock().await;

        let current = self.tokens();
        if current.generation != stale_generation {
            tracing::debug!(
                generation = current.generation,
                "Reusing access token refreshed by another task"
            );
            return Ok(current);
        }
        if self.refresh_attempts.load(Ordering::Acquire) != attempts_seen {
            if let Some(error) = last_failure.as_ref() {
                tracing::debug!("Reusing refresh failure of another task");
                return Err(error.clone());
            }
        }

        let outcome = self
            .exchange(transport, endpoint, &current, Utc::now())
            .await;
        self.refresh_attempts.fetch_add(1, Ordering::AcqRel);
        let refreshed = match outcome {
            Ok(tokens) => {
                *last_failure = None;
                Arc::new(tokens)
            }
            Err(e) => {
                tracing::warn!("Access token refresh failed: {e}");
                *last_failure = Some(e.clone());
                return Err(e);
            }
        };
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&refreshed);
        tracing::info!(
            generation = refreshed.generation,
            expires_at = ?refreshed.expires_at,
            "Access token refreshed"
        );

        if let Some(path) = &self.store {
            let persisted = match self.to_file(&refreshed) {
                Ok(file) => file.save(path).await,
                Err(e) => Err(e),
            };
            if let Err(e) = persisted {
                tracing::warn!("Failed to persist refreshed credentials: {e}");
            }
        }

        Ok(refreshed)
    }

    async fn exchange(
        &self,
        transport: &dyn Transport,
        endpoint: &TokenEndpoint,
        current: &TokenSet,
        now: DateTime<Utc>,
    ) -> Result<TokenSet, AuthError> {
        let refresh_token = current
            .refresh_token
            .as_ref()
            .ok_or_else(|| AuthError::RefreshFailed {
                status: 0,
                message: "no refresh token available".to_string(),
            })?;
        if current.refresh_token_expired_at(now) {
            return Err(AuthError::RefreshTokenExpired);
        }

        let endpoint = match &self.token_url {
            Some(url) => TokenEndpoint::new(url.clone()).with_timeout(endpoint.timeout()),
            None => endpoint.clone(),
        };
        tracing::debug!(
            generation = current.generation,
            token_url = %endpoint.url(),
            "Refreshing access token"
        );
        let response = refresh_access_token(
            transport,
            &endpoint,
            &self.client_id,
            &self.client_secret,
            refresh_token,
        )
        .await?;

        let mut next = response
            .into_token_set(now)
            .map_err(|e| AuthError::RefreshFailed {
                status: 200,
                message: e.to_string(),
            })?;
        if next.refresh_token.is_none() {
            next.refresh_token = current.refresh_token.clone();
            next.refresh_expires_at = current.refresh_expires_at;
        }
        next.generation = current.generation + 1;
        Ok(next)
    }
}

/// Builder for [`RefreshableCredential`].
#[derive(Debug, Default)]
pub struct RefreshableCredentialBuilder {
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    access_token: Option<AccessToken>,
    refresh_token: Option<RefreshToken>,
    token_type: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    refresh_expires_at: Option<DateTime<Utc>>,
    base_url: Option<BaseUrl>,
    token_url: Option<String>,
    store: Option<PathBuf>,
}

impl RefreshableCredentialBuilder {
    /// Sets the OAuth client id.
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the OAuth client secret.
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the access token.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the refresh token.
    #[must_use]
    pub fn refresh_token(mut self, token: RefreshToken) -> Self {
        self.refresh_token = Some(token);
        self
    }

    /// Sets the access-token expiry. Without one the first request refreshes.
    #[must_use]
    pub const fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }

    /// Sets the refresh-token expiry.
    #[must_use]
    pub const fn refresh_expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.refresh_expires_at = Some(at);
        self
    }

    /// Sets every token field from a token set.
    #[must_use]
    pub fn tokens(mut self, tokens: TokenSet) -> Self {
        self.access_token = Some(tokens.access_token);
        self.refresh_token = tokens.refresh_token;
        self.token_type = Some(tokens.token_type);
        self.expires_at = tokens.expires_at;
        self.refresh_expires_at = tokens.refresh_expires_at;
        self
    }

    /// Sets the API host; the token endpoint is `{base_url}/oauth/token`.
    ///
    /// Without a base URL or token URL, refreshes use the host of the client
    /// making the request.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Overrides the token endpoint URL.
    #[must_use]
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// Persists tokens to `path` after every refresh.
    #[must_use]
    pub fn store(mut self, path: impl Into<PathBuf>) -> Self {
        self.store = Some(path.into());
        self
    }

    /// Builds the credential.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] when the client id,
    /// client secret, access token or refresh token is missing.
    pub fn build(self) -> Result<RefreshableCredential, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let client_secret = self.client_secret.ok_or(ConfigError::MissingRequiredField {
            field: "client_secret",
        })?;
        let access_token = self.access_token.ok_or(ConfigError::MissingRequiredField {
            field: "access_token",
        })?;
        let refresh_token = self.refresh_token.ok_or(ConfigError::MissingRequiredField {
            field: "refresh_token",
        })?;

        let token_url = self.token_url.or_else(|| {
            self.base_url
                .as_ref()
                .map(|base_url| base_url.join("oauth/token"))
        });

        let tokens = TokenSet {
            access_token,
            token_type: self.token_type.unwrap_or_else(|| BEARER.to_string()),
            refresh_token: Some(refresh_token),
            expires_at: self.expires_at,
            refresh_expires_at: self.refresh_expires_at,
            generation: 0,
        };

        Ok(RefreshableCredential {
            client_id,
            client_secret,
            base_url: self.base_url,
            token_url,
            store: self.store,
            tokens: RwLock::new(Arc::new(tokens)),
            refresh_lock: Mutex::new(None),
            refresh_attempts: AtomicU64::new(0),
        })
    }
}
