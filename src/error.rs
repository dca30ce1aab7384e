//! Error types for the FactorialHR client.
//!
//! This module contains the configuration error type used when building
//! [`FactorialConfig`](crate::FactorialConfig), validating credentials, and
//! loading persisted credential files.
//!
//! Errors raised while talking to the API live next to the code that raises
//! them: [`ApiError`](crate::clients::ApiError) for the request pipeline,
//! [`AuthError`](crate::auth::oauth::AuthError) for token exchanges, and
//! [`ResourceError`](crate::rest::ResourceError) for typed resource calls.
//!
//! # Example
//!
//! ```rust
//! use factorialhr::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring the client or its credentials.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Factorial API key.")]
    EmptyApiKey,

    /// OAuth client id cannot be empty.
    #[error("OAuth client id cannot be empty.")]
    EmptyClientId,

    /// OAuth client secret cannot be empty.
    #[error("OAuth client secret cannot be empty.")]
    EmptyClientSecret,

    /// Access token cannot be empty.
    #[error("Access token cannot be empty.")]
    EmptyAccessToken,

    /// Refresh token cannot be empty.
    #[error("Refresh token cannot be empty.")]
    EmptyRefreshToken,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme (e.g., 'https://api.factorialhr.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM-DD' (e.g., '2025-10-01').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Page size must be a positive number.
    #[error("Invalid page size {size}. The page size must be greater than zero.")]
    InvalidPageSize {
        /// The rejected page size.
        size: u32,
    },

    /// Request timeout must be non-zero.
    #[error("Request timeout cannot be zero.")]
    ZeroTimeout,

    /// A token lifetime does not fit in a calendar date.
    #[error("Invalid token lifetime of {seconds} seconds.")]
    InvalidTokenLifetime {
        /// The lifetime reported by the token endpoint.
        seconds: i64,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A persisted credential file could not be read.
    #[error("Cannot read credential file '{}': {message}", path.display())]
    CredentialFileUnreadable {
        /// Location of the file.
        path: PathBuf,
        /// The underlying I/O error message.
        message: String,
    },

    /// A credential file could not be written.
    #[error("Cannot write credential file '{}': {message}", path.display())]
    CredentialFileUnwritable {
        /// Location of the file.
        path: PathBuf,
        /// The underlying I/O error message.
        message: String,
    },

    /// A persisted credential file is malformed or misses required fields.
    #[error("Invalid credential file '{}': {reason}", path.display())]
    InvalidCredentialFile {
        /// Location of the file.
        path: PathBuf,
        /// What is wrong with the file contents.
        reason: String,
    },
}
