//! Configuration for the Graph client and friend sources
//!
//! Loaded from a YAML or JSON file (YAML is a superset, so one parser
//! handles both), from inline JSON, or from defaults. A handful of
//! environment variables override file values.

use crate::auth::{AuthConfig, Location};
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, JsonValue, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the session access token
pub const ENV_ACCESS_TOKEN: &str = "GRAPH_ACCESS_TOKEN";
/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "GRAPH_BASE_URL";
/// Environment variable overriding the API version
pub const ENV_API_VERSION: &str = "GRAPH_API_VERSION";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Graph API host
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Version path prefix, e.g. `v19.0`
    #[serde(default)]
    pub api_version: Option<String>,

    /// Pre-issued session token
    #[serde(default)]
    pub access_token: Option<String>,

    /// Where the token goes on graph queries
    #[serde(default)]
    pub token_location: Location,

    /// Friend source definitions
    #[serde(default)]
    pub friends: FriendSourcesConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_base_url() -> String {
    "https://graph.facebook.com".to_string()
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: None,
            access_token: None,
            token_location: Location::default(),
            friends: FriendSourcesConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

// ============================================================================
// Friend Sources
// ============================================================================

/// Endpoints and fields for the two friend sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendSourcesConfig {
    /// Friends already using the app (single request)
    #[serde(default = "default_direct_path")]
    pub direct_path: String,

    /// All friends, for inviting (paginated)
    #[serde(default = "default_invitable_path")]
    pub invitable_path: String,

    /// Fields requested for every friend
    #[serde(default = "default_friend_fields")]
    pub fields: Vec<String>,
}

fn default_direct_path() -> String {
    "/me/friends".to_string()
}

fn default_invitable_path() -> String {
    "/me/invitable_friends".to_string()
}

fn default_friend_fields() -> Vec<String> {
    ["name", "email", "friends", "picture"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for FriendSourcesConfig {
    fn default() -> Self {
        Self {
            direct_path: default_direct_path(),
            invitable_path: default_invitable_path(),
            fields: default_friend_fields(),
        }
    }
}

impl FriendSourcesConfig {
    /// Comma-joined `fields` query value
    pub fn fields_param(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retries per request (0 = a failed page halts the run)
    #[serde(default)]
    pub max_retries: u32,

    /// Backoff between retries
    #[serde(default)]
    pub backoff: BackoffType,

    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Optional client-side rate limit
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    60_000
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            max_retries: 0,
            backoff: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            rate_limit: None,
            user_agent: None,
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl GraphConfig {
    /// Load from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse YAML (or JSON) text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse inline JSON
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Set the access token
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        let token: String = token.into();
        self.access_token = token.none_if_empty();
        self
    }

    /// Apply `GRAPH_*` overrides from the process environment
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored
    #[must_use]
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_ACCESS_TOKEN).none_if_empty() {
            self.access_token = Some(token);
        }
        if let Some(base_url) = lookup(ENV_BASE_URL).none_if_empty() {
            self.base_url = base_url;
        }
        if let Some(version) = lookup(ENV_API_VERSION).none_if_empty() {
            self.api_version = Some(version);
        }
        self
    }

    /// Check the config is usable for graph queries
    pub fn validate(&self) -> Result<()> {
        if self.access_token.as_deref().map_or(true, str::is_empty) {
            return Err(Error::missing_config_field("access_token"));
        }

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_config("base_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.friends.direct_path.trim().is_empty() {
            return Err(Error::invalid_config("friends.direct_path", "must not be empty"));
        }
        if self.friends.invitable_path.trim().is_empty() {
            return Err(Error::invalid_config(
                "friends.invitable_path",
                "must not be empty",
            ));
        }

        Ok(())
    }

    /// Session credential for graph queries
    pub fn auth_config(&self) -> AuthConfig {
        match self.access_token.clone().none_if_empty() {
            Some(token) => AuthConfig::AccessToken {
                token,
                location: self.token_location,
            },
            None => AuthConfig::None,
        }
    }

    /// HTTP client settings
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.clone())
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .backoff(
                self.http.backoff,
                Duration::from_millis(self.http.initial_backoff_ms),
                Duration::from_millis(self.http.max_backoff_ms),
            );

        if let Some(rate_limit) = &self.http.rate_limit {
            builder = builder.rate_limit(rate_limit.clone());
        }
        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        builder.build()
    }

    /// JSON rendering with the token masked
    pub fn redacted(&self) -> JsonValue {
        let mut value = serde_json::to_value(self).unwrap_or(JsonValue::Null);
        if let Some(token) = value.get_mut("access_token") {
            if !token.is_null() {
                *token = JsonValue::String("<redacted>".to_string());
            }
        }
        value
    }
}
