//! HTTP response type returned by a [`Transport`](crate::clients::Transport).

use std::collections::HashMap;

/// A raw response: status, lowercased headers and undecoded body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// Raw body text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response, lowercasing header names.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let headers = headers
            .into_iter()
            .fold(HashMap::new(), |mut acc: HashMap<String, Vec<String>>, (k, v)| {
                acc.entry(k.to_lowercase()).or_default().extend(v);
                acc
            });
        Self {
            code,
            headers,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` when the API rejected the credentials.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.code == 401
    }

    /// Returns the first value of a header, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Retry-After` delay in seconds, if present.
    ///
    /// The client never retries on its own; this is exposed for callers
    /// implementing their own retry policy.
    #[must_use]
    pub fn retry_after(&self) -> Option<f64> {
        self.header("retry-after")
            .and_then(|value| value.trim().parse::<f64>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ok_for_2xx_only() {
        assert!(HttpResponse::new(200, HashMap::new(), "").is_ok());
        assert!(HttpResponse::new(204, HashMap::new(), "").is_ok());
        assert!(!HttpResponse::new(301, HashMap::new(), "").is_ok());
        assert!(!HttpResponse::new(401, HashMap::new(), "").is_ok());
        assert!(HttpResponse::new(401, HashMap::new(), "").is_unauthorized());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), vec!["application/json".to_string()]);
        let response = HttpResponse::new(200, headers, "{}");

        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_retry_after_parses_seconds() {
        let mut headers = HashMap::new();
        headers.insert("Retry-After".to_string(), vec!["2.5".to_string()]);
        let response = HttpResponse::new(429, headers, "");
        assert_eq!(response.retry_after(), Some(2.5));

        let response = HttpResponse::new(429, HashMap::new(), "");
        assert_eq!(response.retry_after(), None);
    }
}
