//! Calls to the OAuth token endpoint.
//!
//! Both grants Factorial supports post a form to a [`TokenEndpoint`],
//! normally `{base_url}/oauth/token` of the configured host:
//!
//! - [`refresh_access_token`]: `grant_type=refresh_token`
//! - [`exchange_authorization_code`]: `grant_type=authorization_code`
//!
//! Requests go through the same [`Transport`] as API calls so they share its
//! connection pool.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;

use crate::auth::oauth::AuthError;
use crate::auth::token::{AccessTokenResponse, TokenSet};
use crate::clients::{HttpMethod, PreparedRequest, RequestBody, Transport};
use crate::config::{ClientId, ClientSecret, FactorialConfig, RefreshToken, DEFAULT_TIMEOUT};

const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";

const AUTHORIZATION_CODE_GRANT_TYPE: &str = "authorization_code";

const TOKEN_PATH: &str = "oauth/token";

/// Where token requests are sent, and how long they may take.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenEndpoint {
    url: String,
    timeout: Duration,
}

impl TokenEndpoint {
    /// Creates an endpoint with the default timeout.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// The token endpoint of the configured host, with its timeout.
    #[must_use]
    pub fn for_config(config: &FactorialConfig) -> Self {
        Self {
            url: config.token_url(),
            timeout: config.timeout(),
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for TokenEndpoint {
    fn default() -> Self {
        Self::for_config(&FactorialConfig::default())
    }
}

/// Posts a token request and parses the response.
///
/// On failure returns the status (0 when no response arrived) and a message.
async fn request_token(
    transport: &dyn Transport,
    endpoint: &TokenEndpoint,
    form: Vec<(String, String)>,
) -> Result<AccessTokenResponse, (u16, String)> {
    let request = PreparedRequest {
        method: HttpMethod::Post,
        url: endpoint.url.clone(),
        path: TOKEN_PATH.to_string(),
        page: None,
        query: Vec::new(),
        headers: HashMap::from([("Accept".to_string(), "application/json".to_string())]),
        body: Some(RequestBody::Form(form)),
        timeout: endpoint.timeout,
    };

    let response = transport
        .send(&request)
        .await
        .map_err(|e| (0, e.to_string()))?;

    if !response.is_ok() {
        return Err((response.code, response.body));
    }

    serde_json::from_str(&response.body).map_err(|e| {
        (
            response.code,
            format!("Failed to parse token response: {e}"),
        )
    })
}

/// Exchanges a refresh token for a new access token.
///
/// # Errors
///
/// Returns [`AuthError::RefreshFailed`] when the endpoint is unreachable,
/// answers with a non-2xx status, or returns an unparseable body.
pub async fn refresh_access_token(
    transport: &dyn Transport,
    endpoint: &TokenEndpoint,
    client_id: &ClientId,
    client_secret: &ClientSecret,
    refresh_token: &RefreshToken,
) -> Result<AccessTokenResponse, AuthError> {
    let form = vec![
        ("client_id".to_string(), client_id.as_ref().to_string()),
        ("client_secret".to_string(), client_secret.as_ref().to_string()),
        ("grant_type".to_string(), REFRESH_TOKEN_GRANT_TYPE.to_string()),
        ("refresh_token".to_string(), refresh_token.as_ref().to_string()),
    ];

    request_token(transport, endpoint, form)
        .await
        .map_err(|(status, message)| AuthError::RefreshFailed { status, message })
}

/// Exchanges an authorization code for a token set.
///
/// # Errors
///
/// Returns [`AuthError::CodeExchangeFailed`] when the endpoint rejects the
/// code or returns an unusable token.
pub async fn exchange_authorization_code(
    transport: &dyn Transport,
    endpoint: &TokenEndpoint,
    client_id: &ClientId,
    client_secret: &ClientSecret,
    code: &str,
    redirect_uri: &str,
) -> Result<TokenSet, AuthError> {
    let form = vec![
        ("client_id".to_string(), client_id.as_ref().to_string()),
        ("client_secret".to_string(), client_secret.as_ref().to_string()),
        ("code".to_string(), code.to_string()),
        ("grant_type".to_string(), AUTHORIZATION_CODE_GRANT_TYPE.to_string()),
        ("redirect_uri".to_string(), redirect_uri.to_string()),
    ];

    let response = request_token(transport, endpoint, form)
        .await
        .map_err(|(status, message)| AuthError::CodeExchangeFailed { status, message })?;

    response
        .into_token_set(Utc::now())
        .map_err(|e| AuthError::CodeExchangeFailed {
            status: 200,
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ReqwestTransport;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> (ClientId, ClientSecret) {
        (
            ClientId::new("client").unwrap(),
            ClientSecret::new("secret").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_refresh_posts_form_and_parses_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=old-refresh"))
            .and(body_string_contains("client_id=client"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "new-access",
                "refresh_token": "new-refresh",
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (id, secret) = credentials();
        let transport = ReqwestTransport::new().unwrap();
        let response = refresh_access_token(
            &transport,
            &TokenEndpoint::new(format!("{}/oauth/token", server.uri())),
            &id,
            &secret,
            &RefreshToken::new("old-refresh").unwrap(),
        )
        .await
        .unwrap();

        assert_eq!(response.access_token, "new-access");
        assert_eq!(response.refresh_token.as_deref(), Some("new-refresh"));
    }

    #[tokio::test]
    async fn test_refresh_maps_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#))
            .mount(&server)
            .await;

        let (id, secret) = credentials();
        let transport = ReqwestTransport::new().unwrap();
        let error = refresh_access_token(
            &transport,
            &TokenEndpoint::new(format!("{}/oauth/token", server.uri())),
            &id,
            &secret,
            &RefreshToken::new("old").unwrap(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            error,
            AuthError::RefreshFailed { status: 400, ref message } if message.contains("invalid_grant")
        ));
    }

    #[tokio::test]
    async fn test_refresh_maps_unreachable_endpoint_to_status_zero() {
        let (id, secret) = credentials();
        let transport = ReqwestTransport::new().unwrap();
        let error = refresh_access_token(
            &transport,
            &TokenEndpoint::new("http://127.0.0.1:1/oauth/token"),
            &id,
            &secret,
            &RefreshToken::new("old").unwrap(),
        )
        .await
        .unwrap_err();

        assert!(matches!(error, AuthError::RefreshFailed { status: 0, .. }));
    }

    #[test]
    fn test_endpoint_follows_config_host_and_timeout() {
        let config = FactorialConfig::builder()
            .base_url(crate::config::BaseUrl::new("https://api.demo.factorial.dev").unwrap())
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let endpoint = TokenEndpoint::for_config(&config);
        assert_eq!(endpoint.url(), "https://api.demo.factorial.dev/oauth/token");
        assert_eq!(endpoint.timeout(), Duration::from_secs(5));
        assert_eq!(
            TokenEndpoint::default().url(),
            "https://api.factorialhr.com/oauth/token"
        );
    }

    #[tokio::test]
    async fn test_refresh_uses_endpoint_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"access_token": "late"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let (id, secret) = credentials();
        let transport = ReqwestTransport::new().unwrap();
        let endpoint = TokenEndpoint::new(format!("{}/oauth/token", server.uri()))
            .with_timeout(Duration::from_millis(50));
        let error = refresh_access_token(
            &transport,
            &endpoint,
            &id,
            &secret,
            &RefreshToken::new("old").unwrap(),
        )
        .await
        .unwrap_err();

        assert!(matches!(error, AuthError::RefreshFailed { status: 0, .. }));
    }

    #[tokio::test]
    async fn test_code_exchange_returns_token_set() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=the-code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "access",
                "refresh_token": "refresh"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (id, secret) = credentials();
        let transport = ReqwestTransport::new().unwrap();
        let tokens = exchange_authorization_code(
            &transport,
            &TokenEndpoint::new(format!("{}/oauth/token", server.uri())),
            &id,
            &secret,
            "the-code",
            "http://localhost:8080/callback",
        )
        .await
        .unwrap();

        assert_eq!(tokens.access_token.as_ref(), "access");
        assert!(tokens.refresh_expires_at.is_some());
    }

    #[tokio::test]
    async fn test_code_exchange_maps_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
            .mount(&server)
            .await;

        let (id, secret) = credentials();
        let transport = ReqwestTransport::new().unwrap();
        let error = exchange_authorization_code(
            &transport,
            &TokenEndpoint::new(format!("{}/oauth/token", server.uri())),
            &id,
            &secret,
            "bad",
            "http://localhost/cb",
        )
        .await
        .unwrap_err();

        assert!(matches!(error, AuthError::CodeExchangeFailed { status: 401, .. }));
    }
}
