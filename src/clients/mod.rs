//! HTTP client layer for the Factorial API.
//!
//! # Overview
//!
//! - [`Transport`]: sends one prepared request; [`ReqwestTransport`] is the
//!   default implementation
//! - [`HttpRequest`]: one logical request, built with [`HttpRequest::builder`]
//! - [`HttpClient`]: the request pipeline (credentials, one refresh-and-retry
//!   on 401, status mapping, envelope decoding)
//! - [`ResponseEnvelope`], [`Page`], [`PageMeta`]: decoded response bodies
//! - [`pagination`]: sequential page fetching, eager or lazy
//! - [`RestClient`]: convenience facade over all of the above
//! - [`ApiError`]: the error every call returns
//!
//! # Example
//!
//! ```rust,ignore
//! use factorialhr::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "employees/employees")
//!     .query_param("only_active", true)
//!     .build()?;
//! let envelope = client.execute(&request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! The only automatic retry is the single replay after a 401 when the
//! credential can refresh. Rate limits, server errors and transport failures
//! are returned to the caller unchanged.

mod envelope;
mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod pagination;
pub mod rest;
mod transport;

pub use envelope::{Page, PageMeta, ResponseEnvelope};
pub use errors::{
    ApiError, DecodeError, ErrorKind, HttpResponseError, InvalidHttpRequestError, TransportError,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, PAGE_PARAM};
pub use http_response::HttpResponse;
pub use pagination::PageCursor;
pub use rest::RestClient;
pub use transport::{PreparedRequest, RequestBody, ReqwestTransport, Transport};
