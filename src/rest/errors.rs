//! Error type for typed resource operations.
//!
//! A 404 on a lookup by id becomes [`ResourceError::NotFound`]; every other
//! failure keeps its [`ApiError`] so the caller can still inspect the kind,
//! status, path and page.
//!
//! # Example
//!
//! ```rust
//! use factorialhr::rest::ResourceError;
//!
//! let error = ResourceError::NotFound {
//!     resource: "Team",
//!     id: "42".to_string(),
//! };
//! assert_eq!(error.to_string(), "Team with id 42 not found");
//! ```

use thiserror::Error;

use crate::clients::ApiError;

/// Error returned by [`RestResource`](crate::rest::RestResource) operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The API answered 404 for a lookup by id.
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// Resource name, e.g. `"Employee"`.
        resource: &'static str,
        /// The id that was requested.
        id: String,
    },

    /// A filter struct could not be turned into query parameters.
    #[error("Invalid filters for {resource}: {reason}")]
    InvalidFilters {
        /// Resource name.
        resource: &'static str,
        /// Why the filters were rejected.
        reason: String,
    },

    /// A create or update input could not be serialized to JSON.
    #[error("Invalid body for {resource}: {reason}")]
    InvalidBody {
        /// Resource name.
        resource: &'static str,
        /// Serializer message.
        reason: String,
    },

    /// Any other failure of the underlying request.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ResourceError {
    /// Wraps an API error, turning a 404 into [`ResourceError::NotFound`].
    pub(crate) fn from_lookup(error: ApiError, resource: &'static str, id: String) -> Self {
        if error.status() == Some(404) {
            Self::NotFound { resource, id }
        } else {
            Self::Api(error)
        }
    }

    /// Returns the wrapped API error, if any.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
