//! Authentication module
//!
//! Supports: Graph access token (query parameter or Bearer header)
//!
//! The session token is obtained and refreshed elsewhere; the
//! `Authenticator` only attaches it to outgoing requests.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, Location};

#[cfg(test)]
mod tests;
