//! Graph API data model
//!
//! Friend records are kept as opaque JSON objects: the remote API owns the
//! schema and nothing here validates it.

use crate::error::{Error, Result};
use crate::pagination::Cursor;
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

// ============================================================================
// Friend Record
// ============================================================================

/// One friend as returned by the Graph API
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FriendRecord(JsonObject);

impl FriendRecord {
    /// Wrap a raw JSON object
    pub fn new(fields: JsonObject) -> Self {
        Self(fields)
    }

    /// Get a raw field
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// Graph object id (app-scoped for direct friends, an invite token for invitable ones)
    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    /// Display name
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// Email, when the permission was granted
    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }

    /// `picture.data.url`
    pub fn picture_url(&self) -> Option<&str> {
        self.get("picture")?.get("data")?.get("url")?.as_str()
    }

    /// Borrow all fields
    pub fn fields(&self) -> &JsonObject {
        &self.0
    }

    /// Consume into the raw JSON object
    pub fn into_inner(self) -> JsonObject {
        self.0
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(JsonValue::as_str)
    }
}

impl From<JsonObject> for FriendRecord {
    fn from(fields: JsonObject) -> Self {
        Self(fields)
    }
}

impl TryFrom<JsonValue> for FriendRecord {
    type Error = Error;

    fn try_from(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(map) => Ok(Self(map)),
            other => Err(Error::decode(format!(
                "expected friend object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

// ============================================================================
// Page Response
// ============================================================================

/// One page of a Graph list query
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageResponse {
    /// Records on this page (possibly none)
    pub records: Vec<FriendRecord>,
    /// Continuation cursor, absent on the last page
    pub next: Option<Cursor>,
}

impl PageResponse {
    /// Create a page
    pub fn new(records: Vec<FriendRecord>, next: Option<Cursor>) -> Self {
        Self { records, next }
    }

    /// Create a final page (no cursor)
    pub fn last(records: Vec<FriendRecord>) -> Self {
        Self::new(records, None)
    }

    /// Number of records on the page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the page carries no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether another page follows
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Decode the Graph list envelope
    ///
    /// ```text
    /// {"data": [...], "paging": {"cursors": {...}, "next": "https://..."}}
    /// ```
    pub fn from_value(value: JsonValue) -> Result<Self> {
        check_graph_error(&value, None)?;

        let mut body = match value {
            JsonValue::Object(body) => body,
            other => {
                return Err(Error::decode(format!(
                    "expected JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let records = match body.remove("data") {
            Some(JsonValue::Array(items)) => items
                .into_iter()
                .map(FriendRecord::try_from)
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(Error::decode(format!(
                    "'data' must be an array, got {}",
                    json_kind(&other)
                )))
            }
            None => return Err(Error::missing_field("data")),
        };

        let next = match body.remove("paging") {
            Some(paging) => serde_json::from_value::<Paging>(paging)?
                .next
                .and_then(Cursor::parse),
            None => None,
        };

        Ok(Self { records, next })
    }
}

/// `paging` block of a list response
#[derive(Debug, Clone, Default, Deserialize)]
struct Paging {
    #[serde(default)]
    next: Option<String>,
}

// ============================================================================
// Profile
// ============================================================================

/// The session user's own profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Any other requested fields
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl UserProfile {
    /// Decode a `/me` response
    pub fn from_value(value: JsonValue) -> Result<Self> {
        check_graph_error(&value, None)?;
        for field in ["id", "name"] {
            if value.get(field).is_none() {
                return Err(Error::missing_field(field));
            }
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Profile picture metadata from `/me/picture?redirect=false`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePicture {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default)]
    pub is_silhouette: bool,
}

impl ProfilePicture {
    /// Decode `{"data": {"url": ..., ...}}`
    pub fn from_value(value: JsonValue) -> Result<Self> {
        check_graph_error(&value, None)?;
        let data = value
            .get("data")
            .ok_or_else(|| Error::missing_field("data"))?;
        if data.get("url").and_then(JsonValue::as_str).is_none() {
            return Err(Error::missing_field("data.url"));
        }
        Ok(serde_json::from_value(data.clone())?)
    }
}

// ============================================================================
// Graph Errors
// ============================================================================

/// Body of a Graph error envelope
#[derive(Debug, Clone, Deserialize)]
struct GraphErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    code: i64,
}

/// Fail if `value` is a Graph error envelope `{"error": {...}}`
pub(crate) fn check_graph_error(value: &JsonValue, status: Option<u16>) -> Result<()> {
    let Some(error) = value.get("error") else {
        return Ok(());
    };
    let body: GraphErrorBody = serde_json::from_value(error.clone()).unwrap_or(GraphErrorBody {
        message: error.to_string(),
        kind: String::new(),
        code: 0,
    });
    Err(Error::GraphApi {
        status,
        code: body.code,
        kind: body.kind,
        message: body.message,
    })
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
