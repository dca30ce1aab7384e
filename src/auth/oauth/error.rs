//! Authentication error types.
//!
//! # Example
//!
//! ```rust
//! use factorialhr::auth::oauth::AuthError;
//!
//! let error = AuthError::RefreshFailed {
//!     status: 400,
//!     message: "invalid_grant".to_string(),
//! };
//! assert!(error.to_string().contains("invalid_grant"));
//! ```

use thiserror::Error;

/// Errors raised while obtaining or using OAuth tokens.
///
/// A refresh failure is never retried automatically; callers should
/// re-authenticate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The token endpoint rejected the refresh, or could not be reached
    /// (`status` is 0 then).
    #[error("Token refresh failed with status {status}: {message}")]
    RefreshFailed {
        /// HTTP status of the token endpoint, or 0 on transport failure.
        status: u16,
        /// Response body or failure description.
        message: String,
    },

    /// The refresh token itself has expired; a new authorization is needed.
    #[error("Refresh token has expired. Re-authorize the application to obtain new tokens.")]
    RefreshTokenExpired,

    /// The API rejected the credentials even after a fresh token.
    #[error("Unauthorized: '{path}'{} rejected the credentials after a token refresh", page_suffix(.page))]
    Unauthorized {
        /// The resource path of the rejected request.
        path: String,
        /// The page being fetched, for listings.
        page: Option<u32>,
    },

    /// The authorization code could not be exchanged for tokens.
    #[error("Authorization code exchange failed with status {status}: {message}")]
    CodeExchangeFailed {
        /// HTTP status of the token endpoint, or 0 on transport failure.
        status: u16,
        /// Response body or failure description.
        message: String,
    },

    /// The callback `state` does not match the one sent.
    #[error("State parameter mismatch: expected '{expected}', received '{received}'")]
    StateMismatch {
        /// The state issued with the authorization URL.
        expected: String,
        /// The state received on the callback.
        received: String,
    },

    /// The callback is missing parameters or reports an error.
    #[error("Invalid callback: {reason}")]
    InvalidCallback {
        /// What is wrong with the callback.
        reason: String,
    },
}

fn page_suffix(page: &Option<u32>) -> String {
    page.map(|page| format!(" (page {page})")).unwrap_or_default()
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_failed_includes_status_and_message() {
        let error = AuthError::RefreshFailed {
            status: 401,
            message: "invalid_client".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("invalid_client"));
    }

    #[test]
    fn test_unauthorized_names_path() {
        let error = AuthError::Unauthorized {
            path: "employees/employees".to_string(),
            page: None,
        };
        assert!(error.to_string().contains("employees/employees"));
        assert!(!error.to_string().contains("page"));

        let error = AuthError::Unauthorized {
            path: "employees/employees".to_string(),
            page: Some(3),
        };
        assert!(error.to_string().contains("(page 3)"));
    }

    #[test]
    fn test_state_mismatch_includes_expected_and_received() {
        let error = AuthError::StateMismatch {
            expected: "abc123".to_string(),
            received: "xyz789".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("abc123"));
        assert!(message.contains("xyz789"));
    }

    #[test]
    fn test_auth_error_implements_std_error() {
        let error: &dyn std::error::Error = &AuthError::RefreshTokenExpired;
        let _ = error;
    }
}
