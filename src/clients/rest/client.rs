//! REST client for the Factorial resource API.
//!
//! [`RestClient`] is a thin convenience layer over
//! [`HttpClient`](crate::clients::HttpClient): it normalizes resource paths,
//! applies the configured page size to listings, and exposes the pagination
//! driver as [`all`](RestClient::all) and [`stream`](RestClient::stream).

use std::sync::Arc;

use futures::stream::BoxStream;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::Credential;
use crate::clients::envelope::{Page, ResponseEnvelope};
use crate::clients::errors::{ApiError, DecodeError, InvalidHttpRequestError};
use crate::clients::http_client::HttpClient;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::pagination;
use crate::clients::transport::Transport;
use crate::config::FactorialConfig;

/// Query parameter carrying the page size.
pub const LIMIT_PARAM: &str = "limit";

/// Client for the versioned REST resources.
///
/// # Example
///
/// ```rust,no_run
/// use factorialhr::{ApiKey, Credential, FactorialConfig, RestClient};
///
/// # async fn run() -> Result<(), factorialhr::ApiError> {
/// let client = RestClient::new(
///     FactorialConfig::default(),
///     Credential::api_key(ApiKey::new("my-key")?),
/// )?;
/// let teams: Vec<serde_json::Value> = client.all("teams/teams", Vec::new()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RestClient {
    http_client: HttpClient,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a client with the default `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: FactorialConfig, credential: Credential) -> Result<Self, ApiError> {
        Ok(Self {
            http_client: HttpClient::with_reqwest(config, credential)?,
        })
    }

    /// Creates a client over a custom transport.
    #[must_use]
    pub fn with_transport(
        config: FactorialConfig,
        credential: Credential,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            http_client: HttpClient::new(config, credential, transport),
        }
    }

    /// Returns the underlying pipeline.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Fetches a path and returns the decoded envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any pipeline failure.
    pub async fn get(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<ResponseEnvelope, ApiError> {
        let request = self.request(HttpMethod::Get, path, query, None)?;
        self.http_client.execute(&request).await
    }

    /// Fetches one page of a listing. Without `page`, the first page.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any pipeline failure, or
    /// [`ApiError::Decode`] when an item does not match `T`.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        page: Option<u32>,
    ) -> Result<Page<T>, ApiError> {
        let page = page.unwrap_or(1);
        let request = self
            .request(HttpMethod::Get, path, self.with_limit(query), None)?
            .with_page(page);
        let raw = self.http_client.execute(&request).await?.into_page(page);
        raw.decode_items().map_err(|message| {
            DecodeError {
                path: request.path.clone(),
                page: Some(page),
                message,
            }
            .into()
        })
    }

    /// Fetches every page of a listing.
    ///
    /// If `query` already names a page, only that page is fetched.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing page; no partial result.
    pub async fn all<T>(&self, path: &str, query: Vec<(String, String)>) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        let request = self.request(HttpMethod::Get, path, self.with_limit(query), None)?;
        pagination::collect_all(&self.http_client, request).await
    }

    /// Streams the items of a listing, fetching pages as they are consumed.
    ///
    /// A request that fails validation yields a single error.
    pub fn stream<'a, T>(
        &'a self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> BoxStream<'a, Result<T, ApiError>>
    where
        T: DeserializeOwned + Send + 'a,
    {
        match self.request(HttpMethod::Get, path, self.with_limit(query), None) {
            Ok(request) => pagination::items(&self.http_client, request),
            Err(e) => Box::pin(futures::stream::once(async move { Err(ApiError::from(e)) })),
        }
    }

    /// Sends a POST with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any pipeline failure.
    pub async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.write(HttpMethod::Post, path, Some(body)).await
    }

    /// Sends a PUT with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any pipeline failure.
    pub async fn put(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.write(HttpMethod::Put, path, Some(body)).await
    }

    /// Sends a PATCH with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any pipeline failure.
    pub async fn patch(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.write(HttpMethod::Patch, path, Some(body)).await
    }

    /// Sends a DELETE.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any pipeline failure.
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.write(HttpMethod::Delete, path, None).await
    }

    async fn write(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let request = self.request(method, path, Vec::new(), body)?;
        Ok(self.http_client.execute(&request).await?.into_value())
    }

    fn request(
        &self,
        method: HttpMethod,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<HttpRequest, InvalidHttpRequestError> {
        let mut builder = HttpRequest::builder(method, normalize_path(path)?).query_pairs(query);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        builder.build()
    }

    fn with_limit(&self, mut query: Vec<(String, String)>) -> Vec<(String, String)> {
        if let Some(size) = self.http_client.config().page_size() {
            if !query.iter().any(|(key, _)| key == LIMIT_PARAM) {
                query.push((LIMIT_PARAM.to_string(), size.to_string()));
            }
        }
        query
    }
}

/// Trims surrounding slashes and rejects empty or traversing paths.
fn normalize_path(path: &str) -> Result<String, InvalidHttpRequestError> {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() || trimmed.split('/').any(|segment| segment.is_empty() || segment == "..") {
        return Err(InvalidHttpRequestError::EmptyPath);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_trims_slashes() {
        assert_eq!(normalize_path("/teams/teams/").unwrap(), "teams/teams");
        assert_eq!(normalize_path("employees/employees").unwrap(), "employees/employees");
    }

    #[test]
    fn test_normalize_path_rejects_empty_and_traversal() {
        assert!(normalize_path("").is_err());
        assert!(normalize_path("//").is_err());
        assert!(normalize_path("teams/../admin").is_err());
        assert!(normalize_path("teams//teams").is_err());
    }

    #[test]
    fn test_with_limit_respects_existing_limit() {
        let config = FactorialConfig::builder().page_size(25).build().unwrap();
        let client = RestClient::new(
            config,
            Credential::api_key(crate::config::ApiKey::new("key").unwrap()),
        )
        .unwrap();

        let query = client.with_limit(Vec::new());
        assert_eq!(query, vec![("limit".to_string(), "25".to_string())]);

        let query = client.with_limit(vec![("limit".to_string(), "5".to_string())]);
        assert_eq!(query, vec![("limit".to_string(), "5".to_string())]);
    }
}
