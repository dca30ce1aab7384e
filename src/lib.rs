//! # FactorialHR API Rust Client
//!
//! A typed async client for the [FactorialHR](https://factorialhr.com) REST
//! API: validated configuration, three authentication strategies, a request
//! pipeline that refreshes expired OAuth tokens, and a pagination driver that
//! collects whole listings.
//!
//! ## Overview
//!
//! - Configuration via [`FactorialConfig`] and [`FactorialConfigBuilder`]
//! - Validated newtypes for credentials and URLs
//! - Authentication via [`Credential`]: API key, static OAuth token, or a
//!   [`RefreshableCredential`](auth::RefreshableCredential) with single-flight
//!   refresh and optional file persistence
//! - OAuth authorization-code flow via [`auth::oauth`]
//! - The request pipeline [`HttpClient`] over a pluggable
//!   [`Transport`](clients::Transport)
//! - Pagination, eager or lazy, via [`clients::pagination`]
//! - Typed resources via [`rest`] and the [`RestClient`] facade
//!
//! ## Quick Start
//!
//! ```rust
//! use factorialhr::{ApiKey, ApiVersion, Credential, FactorialConfig};
//!
//! let config = FactorialConfig::builder()
//!     .api_version(ApiVersion::latest())
//!     .page_size(100)
//!     .build()
//!     .unwrap();
//!
//! let credential = Credential::api_key(ApiKey::new("your-api-key").unwrap());
//! assert!(!credential.is_refreshable());
//! assert_eq!(config.page_size(), Some(100));
//! ```
//!
//! ## Fetching Resources
//!
//! ```rust,ignore
//! use factorialhr::{Credential, FactorialConfig, RestClient};
//! use factorialhr::rest::RestResource;
//! use factorialhr::rest::resources::{Employee, EmployeeFilters};
//!
//! let client = RestClient::new(FactorialConfig::default(), credential)?;
//!
//! // Every page, in order; any failing page fails the whole call
//! let employees = Employee::all(&client, &EmployeeFilters::default()).await?;
//!
//! // One record
//! let employee = Employee::get_by_id(&client, employees[0].id).await?;
//! ```
//!
//! ## Refreshable Credentials
//!
//! ```rust,ignore
//! use factorialhr::auth::RefreshableCredential;
//! use factorialhr::Credential;
//!
//! // Loads tokens written by a previous run; refreshed tokens are written back
//! let credential = RefreshableCredential::from_file("factorial.json").await?;
//! let client = RestClient::new(FactorialConfig::default(), Credential::refreshable(credential))?;
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`ApiError`], whose [`kind`](ApiError::kind) is one of
//! configuration, authentication, transport, HTTP, decoding, or invalid
//! request. Errors carry the request path and, for listings, the failing
//! page.
//!
//! ```rust
//! use factorialhr::{ApiKey, ConfigError};
//!
//! assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events and installs no subscriber. Secrets are
//! never logged.
//!
//! ## Design Principles
//!
//! - **No global state**: configuration and credentials are passed explicitly
//! - **Fail-fast validation**: newtypes validate on construction
//! - **Thread-safe**: all client types are `Send + Sync`
//! - **No hidden retries**: only a rejected token is retried, exactly once

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::Credential;
pub use config::{
    AccessToken, ApiKey, ApiVersion, BaseUrl, ClientId, ClientSecret, FactorialConfig,
    FactorialConfigBuilder, RefreshToken,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, ErrorKind, HttpClient, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    Page, PageMeta, RestClient,
};

// Re-export OAuth types for convenience
pub use auth::oauth::{AuthError, StateParam};
