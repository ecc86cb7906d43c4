//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use crate::error::Result;
use crate::graph::{GraphApi, PageResponse};
use crate::types::StringMap;
use serde::{Deserialize, Serialize};

/// Opaque continuation cursor (the `paging.next` URL)
///
/// Never parsed or rewritten; it is sent back to the server byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a raw cursor; an empty string means "no more pages"
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// The cursor URL
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the cursor URL
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A request for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// Initial graph query
    Query {
        /// Graph path, e.g. `/me/invitable_friends`
        path: String,
        /// Query parameters
        params: StringMap,
    },
    /// Follow a continuation cursor
    Follow(Cursor),
}

impl PageRequest {
    /// Create an initial query request
    pub fn query(path: impl Into<String>, params: StringMap) -> Self {
        Self::Query {
            path: path.into(),
            params,
        }
    }

    /// Create a cursor-follow request
    pub fn follow(cursor: Cursor) -> Self {
        Self::Follow(cursor)
    }

    /// Issue the request
    pub async fn send<A: GraphApi + ?Sized>(&self, api: &A) -> Result<PageResponse> {
        match self {
            Self::Query { path, params } => api.query(path, params).await,
            Self::Follow(cursor) => api.follow(cursor).await,
        }
    }
}

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available at this cursor
    Continue(Cursor),
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Pages received so far
    pub pages_fetched: u32,
    /// Records received so far
    pub records_fetched: u64,
    /// Most recent cursor
    pub cursor: Option<Cursor>,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a received page
    pub fn add_page(&mut self, records: usize) {
        self.pages_fetched += 1;
        self.records_fetched += records as u64;
    }

    /// Set cursor
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = Some(cursor);
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Process a page and decide whether another one follows
    fn process_page(&self, page: &PageResponse, state: &mut PaginationState) -> NextPage;
}
