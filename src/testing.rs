//! In-memory `GraphApi` for unit tests

use crate::error::{Error, Result};
use crate::graph::{FriendRecord, GraphApi, PageResponse};
use crate::pagination::Cursor;
use crate::types::StringMap;
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

enum Scripted {
    Page(PageResponse),
    Fail(u16),
}

/// Serves canned pages keyed by graph path or cursor URL
#[derive(Default)]
pub(crate) struct ScriptedGraph {
    responses: HashMap<String, Scripted>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(mut self, key: &str, records: Vec<FriendRecord>, next: Option<&str>) -> Self {
        let next = next.and_then(Cursor::parse);
        self.responses
            .insert(key.to_string(), Scripted::Page(PageResponse::new(records, next)));
        self
    }

    pub(crate) fn fail(mut self, key: &str, status: u16) -> Self {
        self.responses.insert(key.to_string(), Scripted::Fail(status));
        self
    }

    /// Answer `key` only after `delay`
    pub(crate) fn delay(mut self, key: &str, delay: Duration) -> Self {
        self.delays.insert(key.to_string(), delay);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn respond(&self, key: &str) -> Result<PageResponse> {
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
        self.calls.lock().unwrap().push(key.to_string());
        match self.responses.get(key) {
            Some(Scripted::Page(page)) => Ok(page.clone()),
            Some(Scripted::Fail(status)) => Err(Error::http_status(*status, "scripted failure")),
            None => Err(Error::http_status(404, format!("no script for {key}"))),
        }
    }
}

#[async_trait]
impl GraphApi for ScriptedGraph {
    async fn query(&self, path: &str, _params: &StringMap) -> Result<PageResponse> {
        self.respond(path).await
    }

    async fn follow(&self, cursor: &Cursor) -> Result<PageResponse> {
        self.respond(cursor.as_str()).await
    }
}

/// `count` friend records named `{prefix}-{i}`
pub(crate) fn friends(prefix: &str, count: usize) -> Vec<FriendRecord> {
    (0..count)
        .map(|i| {
            let value = json!({"id": format!("{prefix}-{i}"), "name": format!("{prefix} {i}")});
            FriendRecord::try_from(value).unwrap()
        })
        .collect()
}
