//! Authentication for the FactorialHR API.
//!
//! Three strategies are supported through [`Credential`]:
//!
//! - **API key**: a static key in the `x-api-key` header
//! - **Access token**: a static OAuth bearer token
//! - **Refreshable token**: an OAuth token renewed through the token
//!   endpoint when it expires or is rejected, optionally persisted to a
//!   JSON file after every refresh
//!
//! # Example
//!
//! ```rust,no_run
//! use factorialhr::auth::RefreshableCredential;
//! use factorialhr::Credential;
//!
//! # async fn run() -> Result<(), factorialhr::ConfigError> {
//! let credential = RefreshableCredential::from_file("factorial-credentials.json").await?;
//! let credential = Credential::refreshable(credential);
//! # Ok(())
//! # }
//! ```

mod credential;
pub mod oauth;
mod store;
mod token;

pub use credential::{
    Credential, RefreshableCredential, RefreshableCredentialBuilder, API_KEY_HEADER,
    AUTHORIZATION_HEADER,
};
pub(crate) use credential::Authorization;
pub use store::CredentialFile;
pub use token::{
    AccessTokenResponse, TokenSet, DEFAULT_ACCESS_TOKEN_LIFETIME_SECS,
    REFRESH_TOKEN_LIFETIME_DAYS,
};
