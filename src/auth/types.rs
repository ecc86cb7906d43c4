//! Auth configuration types
//!
//! These types describe an already-issued session credential.

use serde::{Deserialize, Serialize};

/// Query parameter name the Graph API reads the token from
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Location for access token placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// `access_token` query parameter
    #[default]
    Query,
    /// `Authorization: Bearer` header
    Header,
}

/// Authentication configuration
#[derive(Clone, Default)]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,

    /// Pre-issued Graph access token
    AccessToken {
        /// The token value
        token: String,
        /// Where to place the token
        location: Location,
    },
}

impl AuthConfig {
    /// Access token passed as a query parameter
    pub fn access_token(token: impl Into<String>) -> Self {
        Self::AccessToken {
            token: token.into(),
            location: Location::Query,
        }
    }

    /// Access token passed as a Bearer header
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::AccessToken {
            token: token.into(),
            location: Location::Header,
        }
    }

    /// Whether any credential is configured
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// Tokens never end up in logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::AccessToken { location, .. } => f
                .debug_struct("AccessToken")
                .field("token", &"<redacted>")
                .field("location", location)
                .finish(),
        }
    }
}
