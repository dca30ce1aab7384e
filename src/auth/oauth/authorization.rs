//! Authorization-code flow helpers.
//!
//! 1. Send the user to [`authorization_url`] with a fresh [`StateParam`].
//! 2. On the redirect, pass the callback query to [`validate_callback`] to
//!    check the state and extract the code.
//! 3. Trade the code for tokens with
//!    [`exchange_authorization_code`](super::exchange_authorization_code).
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use factorialhr::{BaseUrl, ClientId};
//! use factorialhr::auth::oauth::{authorization_url, validate_callback, StateParam};
//!
//! let state = StateParam::from_raw("nonce");
//! let url = authorization_url(
//!     &BaseUrl::default(),
//!     &ClientId::new("client").unwrap(),
//!     "http://localhost:8080/callback",
//!     "read write",
//!     &state,
//! );
//! assert!(url.starts_with("https://api.factorialhr.com/oauth/authorize?client_id=client"));
//!
//! let query = HashMap::from([
//!     ("code".to_string(), "the-code".to_string()),
//!     ("state".to_string(), "nonce".to_string()),
//! ]);
//! assert_eq!(validate_callback(&query, &state).unwrap(), "the-code");
//! ```

use std::collections::HashMap;

use crate::auth::oauth::{AuthError, StateParam};
use crate::config::{BaseUrl, ClientId};

/// Builds the URL that asks the user to authorize the application.
#[must_use]
pub fn authorization_url(
    base_url: &BaseUrl,
    client_id: &ClientId,
    redirect_uri: &str,
    scope: &str,
    state: &StateParam,
) -> String {
    let params = [
        ("client_id", client_id.as_ref()),
        ("redirect_uri", redirect_uri),
        ("response_type", "code"),
        ("scope", scope),
        ("state", state.as_ref()),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{query_string}", base_url.join("oauth/authorize"))
}

/// Checks a callback query and returns the authorization code.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCallback`] when the provider reports an
/// error or the code or state is missing, and [`AuthError::StateMismatch`]
/// when the state differs from `expected_state`.
pub fn validate_callback<S: std::hash::BuildHasher>(
    query: &HashMap<String, String, S>,
    expected_state: &StateParam,
) -> Result<String, AuthError> {
    if let Some(error) = query.get("error") {
        let reason = query
            .get("error_description")
            .map_or_else(|| error.clone(), |desc| format!("{error}: {desc}"));
        return Err(AuthError::InvalidCallback { reason });
    }

    let received = query.get("state").ok_or_else(|| AuthError::InvalidCallback {
        reason: "missing 'state' parameter".to_string(),
    })?;
    if !expected_state.matches(received) {
        return Err(AuthError::StateMismatch {
            expected: expected_state.to_string(),
            received: received.clone(),
        });
    }

    query
        .get("code")
        .filter(|code| !code.is_empty())
        .cloned()
        .ok_or_else(|| AuthError::InvalidCallback {
            reason: "missing 'code' parameter".to_string(),
        })
}
