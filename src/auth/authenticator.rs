//! Authenticator implementation
//!
//! Applies the configured session credential to outgoing requests.

use super::types::{AuthConfig, Location, ACCESS_TOKEN_PARAM};
use crate::error::{Error, Result};
use reqwest::RequestBuilder;

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Get the auth configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),

            AuthConfig::AccessToken { token, .. } if token.is_empty() => {
                Err(Error::auth("access token is empty"))
            }

            AuthConfig::AccessToken { token, location } => match location {
                Location::Query => Ok(req.query(&[(ACCESS_TOKEN_PARAM, token.as_str())])),
                Location::Header => Ok(req.bearer_auth(token)),
            },
        }
    }
}
