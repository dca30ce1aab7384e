//! The transport seam: one HTTP exchange, nothing more.
//!
//! [`Transport`] sends a fully prepared request and returns the raw
//! response. It never inspects status codes, never retries and never
//! touches credentials; those concerns live in
//! [`HttpClient`](crate::clients::HttpClient). Swapping the transport is how
//! tests script responses and count calls.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpMethod;
use crate::clients::http_response::HttpResponse;

/// A request body, already in wire form.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// `application/json`
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
}

/// A request ready to go on the wire.
#[derive(Clone, Debug)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL without query string.
    pub url: String,
    /// Resource path, kept for error context.
    pub path: String,
    /// Page number, kept for error context.
    pub page: Option<u32>,
    /// Ordered query pairs.
    pub query: Vec<(String, String)>,
    /// Complete header set, credentials included.
    pub headers: HashMap<String, String>,
    /// Body, if any.
    pub body: Option<RequestBody>,
    /// Timeout for the whole exchange.
    pub timeout: Duration,
}

impl PreparedRequest {
    /// Builds a transport error tagged with this request's path and page.
    #[must_use]
    pub fn error(&self, message: impl Into<String>) -> TransportError {
        TransportError {
            page: self.page,
            ..TransportError::new(self.path.clone(), message)
        }
    }
}

/// Issues single HTTP exchanges.
///
/// Implementations must be cheap to share: the client holds one behind an
/// `Arc` and uses it from concurrent tasks, including for token refreshes.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no HTTP response was received.
    async fn send(&self, request: &PreparedRequest) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] over a pooled `reqwest` client.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with a rustls-backed connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| TransportError {
                source: Some(Box::new(e)),
                ..TransportError::new("", "failed to initialize HTTP client")
            })?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    fn map_error(request: &PreparedRequest, error: reqwest::Error) -> TransportError {
        let message = if error.is_timeout() {
            format!("request timed out after {:?}", request.timeout)
        } else if error.is_connect() {
            format!("connection failed: {error}")
        } else {
            format!("network error: {error}")
        };
        TransportError {
            timed_out: error.is_timeout(),
            source: Some(Box::new(error)),
            ..request.error(message)
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Patch => self.client.patch(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match &request.body {
            Some(RequestBody::Json(body)) => builder.json(body),
            Some(RequestBody::Form(pairs)) => builder.form(pairs),
            None => builder,
        };

        let response = builder
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| Self::map_error(request, e))?;

        let code = response.status().as_u16();
        let headers = Self::parse_response_headers(response.headers());
        let body = response
            .text()
            .await
            .map_err(|e| Self::map_error(request, e))?;

        Ok(HttpResponse::new(code, headers, body))
    }
}
