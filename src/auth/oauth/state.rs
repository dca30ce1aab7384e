//! State parameter for OAuth CSRF protection.
//!
//! # Example
//!
//! ```rust
//! use factorialhr::auth::oauth::StateParam;
//!
//! let state = StateParam::new();
//! assert_eq!(state.as_ref().len(), 32);
//! assert!(state.matches(&state.to_string()));
//! ```

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt;
use subtle::ConstantTimeEq;

/// A random nonce sent with the authorization URL and checked on callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateParam {
    value: String,
}

// Verify StateParam is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StateParam>();
};

impl StateParam {
    const NONCE_LENGTH: usize = 32;

    /// Generates a fresh random nonce.
    #[must_use]
    pub fn new() -> Self {
        let value: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::NONCE_LENGTH)
            .map(char::from)
            .collect();
        Self { value }
    }

    /// Wraps a state value stored earlier, e.g. in a user session.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { value: raw.into() }
    }

    /// Returns `true` if `received` equals this state.
    ///
    /// The comparison runs in constant time.
    #[must_use]
    pub fn matches(&self, received: &str) -> bool {
        self.value.as_bytes().ct_eq(received.as_bytes()).into()
    }
}

impl Default for StateParam {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<str> for StateParam {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for StateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
