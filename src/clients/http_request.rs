//! HTTP request types for the FactorialHR client.
//!
//! This module provides [`HttpRequest`], the immutable description of one
//! logical API call, and its builder.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::clients::errors::InvalidHttpRequestError;

/// Name of the query parameter carrying the 1-indexed page number.
pub const PAGE_PARAM: &str = "page";

/// HTTP methods supported by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
    /// PUT request.
    Put,
    /// PATCH request.
    Patch,
    /// DELETE request.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for methods that must carry a body.
    #[must_use]
    pub const fn requires_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// One logical request: method, resource path, query, body and timeout.
///
/// Query parameters are kept as ordered pairs so list filters can repeat a
/// key (`ids[]=1&ids[]=2`).
///
/// # Example
///
/// ```rust
/// use factorialhr::clients::{HttpMethod, HttpRequest};
///
/// let request = HttpRequest::builder(HttpMethod::Get, "employees/employees")
///     .query_list("ids", [1, 2])
///     .query_param("only_active", "true")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.query.len(), 3);
/// assert_eq!(request.query[0], ("ids[]".to_string(), "1".to_string()));
/// assert_eq!(request.page(), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method.
    pub http_method: HttpMethod,
    /// Resource path relative to the versioned API root.
    pub path: String,
    /// Ordered query parameters.
    pub query: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<serde_json::Value>,
    /// Headers added on top of the client defaults.
    pub extra_headers: Option<HashMap<String, String>>,
    /// Per-request timeout overriding the client default.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Creates a builder.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] for an empty path, a
    /// POST/PUT/PATCH without a body, or a page parameter that is not a
    /// positive integer.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.trim_matches('/').is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }

        if self.http_method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        if let Some((_, raw)) = self.query.iter().find(|(key, _)| key == PAGE_PARAM) {
            if !matches!(raw.parse::<u32>(), Ok(page) if page >= 1) {
                return Err(InvalidHttpRequestError::InvalidPage { page: raw.clone() });
            }
        }

        Ok(())
    }

    /// Returns the explicit page number, if the query carries one.
    #[must_use]
    pub fn page(&self) -> Option<u32> {
        self.query
            .iter()
            .find(|(key, _)| key == PAGE_PARAM)
            .and_then(|(_, value)| value.parse().ok())
    }

    /// Returns a copy of this request targeting `page`.
    ///
    /// An existing page parameter is replaced in place; otherwise one is
    /// appended.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        let mut request = self.clone();
        let value = page.to_string();
        match request.query.iter_mut().find(|(key, _)| key == PAGE_PARAM) {
            Some(pair) => pair.1 = value,
            None => request.query.push((PAGE_PARAM.to_string(), value)),
        }
        request
    }

    /// Returns `true` if the query carries `key`.
    #[must_use]
    pub fn has_query_param(&self, key: &str) -> bool {
        self.query.iter().any(|(k, _)| k == key)
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    extra_headers: Option<HashMap<String, String>>,
    timeout: Option<Duration>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            extra_headers: None,
            timeout: None,
        }
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Appends one query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Appends a list parameter as repeated `key[]` pairs.
    #[must_use]
    pub fn query_list<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        let key = format!("{}[]", key.trim_end_matches("[]"));
        self.query
            .extend(values.into_iter().map(|v| (key.clone(), v.to_string())));
        self
    }

    /// Appends already-encoded query pairs.
    #[must_use]
    pub fn query_pairs<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.query.extend(pairs);
        self
    }

    /// Requests a specific page.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.query.retain(|(key, _)| key != PAGE_PARAM);
        self.query.push((PAGE_PARAM.to_string(), page.to_string()));
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Overrides the client timeout for this request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds and validates the request.
    ///
    /// # Errors
    ///
    /// See [`HttpRequest::verify`].
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            query: self.query,
            body: self.body,
            extra_headers: self.extra_headers,
            timeout: self.timeout,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Patch.to_string(), "patch");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "teams/teams")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.path, "teams/teams");
        assert!(request.body.is_none());
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_verify_requires_body_for_write_methods() {
        for method in [HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch] {
            let result = HttpRequest::builder(method, "teams/teams").build();
            assert!(matches!(
                result,
                Err(InvalidHttpRequestError::MissingBody { .. })
            ));
        }

        let request = HttpRequest::builder(HttpMethod::Post, "teams/teams")
            .body(json!({"name": "Ops"}))
            .build();
        assert!(request.is_ok());
    }

    #[test]
    fn test_delete_does_not_require_body() {
        let request = HttpRequest::builder(HttpMethod::Delete, "teams/teams/1").build();
        assert!(request.is_ok());
    }

    #[test]
    fn test_verify_rejects_empty_path() {
        let result = HttpRequest::builder(HttpMethod::Get, "/").build();
        assert_eq!(result, Err(InvalidHttpRequestError::EmptyPath));
    }

    #[test]
    fn test_verify_rejects_page_zero_and_garbage() {
        let result = HttpRequest::builder(HttpMethod::Get, "teams/teams")
            .query_param("page", 0)
            .build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidPage { .. })
        ));

        let result = HttpRequest::builder(HttpMethod::Get, "teams/teams")
            .query_param("page", "two")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_query_list_emits_bracketed_repeated_keys() {
        let request = HttpRequest::builder(HttpMethod::Get, "employees/employees")
            .query_list("ids", [3, 5])
            .query_list("emails[]", ["a@example.com"])
            .build()
            .unwrap();

        assert_eq!(
            request.query,
            vec![
                ("ids[]".to_string(), "3".to_string()),
                ("ids[]".to_string(), "5".to_string()),
                ("emails[]".to_string(), "a@example.com".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_builder_replaces_previous_page() {
        let request = HttpRequest::builder(HttpMethod::Get, "teams/teams")
            .page(2)
            .page(4)
            .build()
            .unwrap();
        assert_eq!(request.page(), Some(4));
        assert_eq!(request.query.len(), 1);
    }

    #[test]
    fn test_with_page_keeps_other_params_and_order() {
        let request = HttpRequest::builder(HttpMethod::Get, "teams/teams")
            .query_param("page", 1)
            .query_param("limit", 50)
            .build()
            .unwrap();

        let next = request.with_page(2);
        assert_eq!(
            next.query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "50".to_string()),
            ]
        );
        assert_eq!(request.page(), Some(1));
    }

    #[test]
    fn test_builder_with_headers_and_timeout() {
        let request = HttpRequest::builder(HttpMethod::Get, "teams/teams")
            .header("X-Trace", "abc")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        let headers = request.extra_headers.unwrap();
        assert_eq!(headers.get("X-Trace"), Some(&"abc".to_string()));
        assert_eq!(request.timeout, Some(Duration::from_secs(5)));
    }
}
