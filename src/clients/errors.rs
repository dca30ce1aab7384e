//! HTTP-layer error types for the FactorialHR client.
//!
//! # Error Handling
//!
//! Every failure of a request surfaces as an [`ApiError`], whose variants map
//! one-to-one to the failure kinds a caller needs to tell apart:
//!
//! - [`ApiError::Config`]: bad or missing credentials or credential file
//! - [`ApiError::Auth`]: a refresh failed, or the API rejected the token twice
//! - [`ApiError::Transport`]: connection, DNS or timeout failure ([`TransportError`])
//! - [`ApiError::Http`]: any other non-2xx response ([`HttpResponseError`])
//! - [`ApiError::Decode`]: a body that is not the expected JSON ([`DecodeError`])
//! - [`ApiError::InvalidRequest`]: a request rejected before sending
//!   ([`InvalidHttpRequestError`])
//!
//! Errors carry the request path and, for paginated calls, the page number.
//!
//! # Example
//!
//! ```rust,ignore
//! use factorialhr::clients::{ApiError, ErrorKind};
//!
//! match client.all::<Employee>("employees/employees", &[]).await {
//!     Ok(employees) => println!("{} employees", employees.len()),
//!     Err(e) if e.kind() == ErrorKind::Auth => reauthenticate(),
//!     Err(e) => eprintln!("listing failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::auth::oauth::AuthError;
use crate::error::ConfigError;

/// Formats ` (page N)` for paginated requests.
fn page_suffix(page: Option<&u32>) -> String {
    page.map_or_else(String::new, |page| format!(" (page {page})"))
}

/// A non-2xx response from the API.
#[derive(Debug, Error)]
#[error("HTTP {code} from '{path}'{}: {message}", page_suffix(.page.as_ref()))]
pub struct HttpResponseError {
    /// HTTP status code.
    pub code: u16,
    /// Resource path of the failed request.
    pub path: String,
    /// Page number, for paginated requests.
    pub page: Option<u32>,
    /// Response body.
    pub message: String,
}

/// A failure below HTTP: connection refused, DNS, TLS, or timeout.
#[derive(Debug, Error)]
#[error("Transport error on '{path}'{}: {message}", page_suffix(.page.as_ref()))]
pub struct TransportError {
    /// Resource path of the failed request.
    pub path: String,
    /// Page number, for paginated requests.
    pub page: Option<u32>,
    /// Description of the failure.
    pub message: String,
    /// Whether the request timed out.
    pub timed_out: bool,
    /// The underlying client error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// Creates a transport error without an underlying source.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            page: None,
            message: message.into(),
            timed_out: false,
            source: None,
        }
    }
}

/// A response body that could not be decoded.
#[derive(Debug, Error)]
#[error("Cannot decode response from '{path}'{}: {message}", page_suffix(.page.as_ref()))]
pub struct DecodeError {
    /// Resource path of the request.
    pub path: String,
    /// Page number, for paginated requests.
    pub page: Option<u32>,
    /// What failed to decode.
    pub message: String,
}

/// A request rejected before it was sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method.
        method: String,
    },

    #[error("Request path cannot be empty.")]
    EmptyPath,

    #[error("Invalid page number {page}; pages start at 1.")]
    InvalidPage {
        /// The rejected page number.
        page: String,
    },
}

/// Failure kind of an [`ApiError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Configuration error.
    Config,
    /// Authentication error.
    Auth,
    /// Transport error.
    Transport,
    /// Non-2xx HTTP response.
    Http,
    /// Malformed response body.
    Decode,
    /// Request rejected before sending.
    InvalidRequest,
}

/// Unified error type for every API call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Http(#[from] HttpResponseError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),
}

impl ApiError {
    /// Returns the failure kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Auth(_) => ErrorKind::Auth,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Http(_) => ErrorKind::Http,
            Self::Decode(_) => ErrorKind::Decode,
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// Returns the HTTP status code, for HTTP errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => Some(e.code),
            _ => None,
        }
    }

    /// Returns the page the error occurred on, if known.
    #[must_use]
    pub const fn page(&self) -> Option<u32> {
        match self {
            Self::Http(e) => e.page,
            Self::Transport(e) => e.page,
            Self::Decode(e) => e.page,
            Self::Auth(AuthError::Unauthorized { page, .. }) => *page,
            _ => None,
        }
    }
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};
