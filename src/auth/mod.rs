//! Authentication module
//!
//! The API authenticates with a static bearer token. The `Authenticator`
//! attaches it to outgoing requests; the token itself is kept in a
//! `BearerToken` that never prints its value.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, BearerToken};
