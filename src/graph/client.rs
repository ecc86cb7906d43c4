//! Graph API client
//!
//! `GraphApi` is the seam the friend aggregator depends on: a
//! pre-authenticated query capability plus a raw GET for continuation
//! cursors. `GraphClient` implements it over `HttpClient`.

use super::types::{check_graph_error, PageResponse, ProfilePicture, UserProfile};
use crate::config::GraphConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::Cursor;
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

/// Fields requested for the session user's profile
pub const PROFILE_FIELDS: &str = "name,email,gender";

/// Pre-authenticated graph query capability
#[async_trait]
pub trait GraphApi: Send + Sync {
    /// Query a graph path, e.g. `/me/friends`
    async fn query(&self, path: &str, params: &StringMap) -> Result<PageResponse>;

    /// GET a continuation cursor exactly as the server returned it
    async fn follow(&self, cursor: &Cursor) -> Result<PageResponse>;
}

#[async_trait]
impl<T: GraphApi + ?Sized> GraphApi for std::sync::Arc<T> {
    async fn query(&self, path: &str, params: &StringMap) -> Result<PageResponse> {
        (**self).query(path, params).await
    }

    async fn follow(&self, cursor: &Cursor) -> Result<PageResponse> {
        (**self).follow(cursor).await
    }
}

/// Graph API client over `HttpClient`
#[derive(Debug)]
pub struct GraphClient {
    http: HttpClient,
    api_version: Option<String>,
}

impl GraphClient {
    /// Wrap an already-configured HTTP client
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            api_version: None,
        }
    }

    /// Build from a validated config
    pub fn from_config(config: &GraphConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_auth(config.http_client_config(), config.auth_config());
        let client = Self::new(http);
        Ok(match &config.api_version {
            Some(version) => client.with_api_version(version.clone()),
            None => client,
        })
    }

    /// Prefix graph paths with a version segment
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Versioned path for a graph node or edge
    pub fn graph_path(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        match self.api_version.as_deref().map(|v| v.trim_matches('/')) {
            Some(version) if !version.is_empty() => format!("/{version}/{path}"),
            _ => format!("/{path}"),
        }
    }

    /// Authenticated GET of a graph path, returning the raw JSON body
    pub async fn get_value(&self, path: &str, params: &StringMap) -> Result<JsonValue> {
        let mut request = RequestConfig::new();
        for (key, value) in params {
            request = request.query(key, value);
        }
        let path = self.graph_path(path);
        debug!(path = %path, "Graph query");
        self.http
            .get_json_with_config(&path, request)
            .await
            .map_err(into_graph_error)
    }

    /// The session user's name, email and gender
    pub async fn fetch_profile(&self) -> Result<UserProfile> {
        let params = StringMap::from([("fields".to_string(), PROFILE_FIELDS.to_string())]);
        let value = self.get_value("/me", &params).await?;
        UserProfile::from_value(value)
    }

    /// Metadata for the large profile picture
    pub async fn fetch_profile_picture(&self) -> Result<ProfilePicture> {
        let params = StringMap::from([
            ("type".to_string(), "large".to_string()),
            ("redirect".to_string(), "false".to_string()),
        ]);
        let value = self.get_value("/me/picture", &params).await?;
        ProfilePicture::from_value(value)
    }

    /// Download the large profile picture
    pub async fn download_profile_picture(&self) -> Result<Bytes> {
        let picture = self.fetch_profile_picture().await?;
        // CDN URLs are pre-signed
        self.http
            .get_bytes_with_config(&picture.url, RequestConfig::new().without_auth())
            .await
    }
}

#[async_trait]
impl GraphApi for GraphClient {
    async fn query(&self, path: &str, params: &StringMap) -> Result<PageResponse> {
        let value = self.get_value(path, params).await?;
        PageResponse::from_value(value)
    }

    async fn follow(&self, cursor: &Cursor) -> Result<PageResponse> {
        // Graph `next` links embed the access token already.
        let value: JsonValue = self
            .http
            .get_json_with_config(cursor.as_str(), RequestConfig::new().without_auth())
            .await
            .map_err(into_graph_error)?;
        PageResponse::from_value(value)
    }
}

/// Turn an HTTP status error carrying a Graph error envelope into `Error::GraphApi`
fn into_graph_error(err: Error) -> Error {
    match err {
        Error::HttpStatus { status, body } => {
            match serde_json::from_str::<JsonValue>(&body) {
                Ok(value) => match check_graph_error(&value, Some(status)) {
                    Err(graph_err) => graph_err,
                    Ok(()) => Error::HttpStatus { status, body },
                },
                Err(_) => Error::HttpStatus { status, body },
            }
        }
        other => other,
    }
}
