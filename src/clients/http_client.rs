//! The request pipeline.
//!
//! [`HttpClient`] turns one [`HttpRequest`] into an authenticated HTTP
//! exchange:
//!
//! 1. Ask the credential for headers, refreshing an expired token first
//!    against the configured host's token endpoint.
//! 2. Send the request through the [`Transport`].
//! 3. On a 401 with a refreshable credential, force one refresh and retry
//!    once. A second 401 is an [`AuthError::Unauthorized`].
//! 4. Any other non-2xx status is an [`HttpResponseError`].
//! 5. Decode the body into a [`ResponseEnvelope`].
//!
//! Transport failures are never retried.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::auth::oauth::{AuthError, TokenEndpoint};
use crate::auth::{Authorization, Credential};
use crate::clients::envelope::ResponseEnvelope;
use crate::clients::errors::{ApiError, DecodeError, HttpResponseError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::{PreparedRequest, RequestBody, ReqwestTransport, Transport};
use crate::config::FactorialConfig;

/// Crate version reported in the User-Agent header.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Authenticated HTTP client for the versioned resource API.
///
/// Cloning is cheap and clones share the credential and connection pool.
#[derive(Clone)]
pub struct HttpClient {
    config: FactorialConfig,
    credential: Credential,
    transport: Arc<dyn Transport>,
    token_endpoint: TokenEndpoint,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("credential", &self.credential)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Creates a client over an explicit transport.
    #[must_use]
    pub fn new(
        config: FactorialConfig,
        credential: Credential,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}FactorialHR Rust Client v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            token_endpoint: TokenEndpoint::for_config(&config),
            config,
            credential,
            transport,
            default_headers,
        }
    }

    /// Creates a client over a new [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn with_reqwest(config: FactorialConfig, credential: Credential) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::new(config, credential, Arc::new(transport)))
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &FactorialConfig {
        &self.config
    }

    /// Returns the credential.
    #[must_use]
    pub const fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Returns the transport.
    #[must_use]
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Returns the headers sent with every request, credentials excluded.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request and decodes the response envelope.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send); additionally returns [`ApiError::Decode`]
    /// when the body is not valid JSON.
    pub async fn execute(&self, request: &HttpRequest) -> Result<ResponseEnvelope, ApiError> {
        let response = self.send(request).await?;
        let page = request.page();
        ResponseEnvelope::decode(&response.body, page.unwrap_or(1)).map_err(|message| {
            DecodeError {
                path: request.path.clone(),
                page,
                message,
            }
            .into()
        })
    }

    /// Sends a request with authentication and the single 401 retry, and
    /// returns the raw 2xx response.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidRequest`] if the request fails validation
    /// - [`ApiError::Auth`] if a refresh fails or the retry is rejected too
    /// - [`ApiError::Transport`] if no response was received
    /// - [`ApiError::Http`] for any other non-2xx status
    pub async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        request.verify()?;

        let transport = self.transport.as_ref();
        let endpoint = &self.token_endpoint;
        let authorization = self.credential.authorize(transport, endpoint).await?;
        let mut response = self.attempt(request, &authorization).await?;

        if response.is_unauthorized() && self.credential.is_refreshable() {
            tracing::warn!(
                "Request to '{}' was rejected with 401; refreshing the access token",
                request.path
            );
            if let Some(fresh) = self
                .credential
                .reauthorize(transport, endpoint, &authorization)
                .await?
            {
                response = self.attempt(request, &fresh).await?;
                if response.is_unauthorized() {
                    return Err(AuthError::Unauthorized {
                        path: request.path.clone(),
                        page: request.page(),
                    }
                    .into());
                }
            }
        }

        if !response.is_ok() {
            return Err(HttpResponseError {
                code: response.code,
                path: request.path.clone(),
                page: request.page(),
                message: response.body,
            }
            .into());
        }

        Ok(response)
    }

    async fn attempt(
        &self,
        request: &HttpRequest,
        authorization: &Authorization,
    ) -> Result<HttpResponse, ApiError> {
        let prepared = self.prepare(request, authorization);
        tracing::debug!(
            method = %prepared.method,
            path = %prepared.path,
            page = ?prepared.page,
            "Sending request"
        );
        Ok(self.transport.send(&prepared).await?)
    }

    fn prepare(&self, request: &HttpRequest, authorization: &Authorization) -> PreparedRequest {
        let mut headers = self.default_headers.clone();
        if let Some(extra) = &request.extra_headers {
            headers.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        headers.extend(
            authorization
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        PreparedRequest {
            method: request.http_method,
            url: self.config.resource_url(&request.path),
            path: request.path.clone(),
            page: request.page(),
            query: request.query.clone(),
            headers,
            body: request.body.clone().map(RequestBody::Json),
            timeout: request.timeout.unwrap_or_else(|| self.config.timeout()),
        }
    }
}
