//! REST client for the versioned Factorial resource API.

mod client;

pub use client::{RestClient, LIMIT_PARAM};
