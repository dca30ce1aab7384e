//! OAuth flows against the Factorial token endpoint.
//!
//! # Overview
//!
//! - [`refresh_access_token`]: trade a refresh token for a new access token
//! - [`authorization_url`], [`validate_callback`],
//!   [`exchange_authorization_code`]: the authorization-code flow
//! - [`StateParam`]: CSRF nonce for the authorization-code flow
//! - [`TokenEndpoint`]: the token URL and timeout both grants use
//! - [`AuthError`]: everything that can go wrong while authenticating
//!
//! Automatic refreshing during API calls is handled by
//! [`RefreshableCredential`](crate::auth::RefreshableCredential); the
//! functions here are the building blocks it uses.

mod authorization;
mod error;
mod state;
mod token_refresh;

pub use authorization::{authorization_url, validate_callback};
pub use error::AuthError;
pub use state::StateParam;
pub use token_refresh::{exchange_authorization_code, refresh_access_token, TokenEndpoint};
