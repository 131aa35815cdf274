//! HTTP client module
//!
//! A thin wrapper over reqwest that knows the API base URL, attaches
//! authentication, and turns non-success statuses into typed errors.
//!
//! No retries happen here; failures propagate to the caller.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
