//! Aggregation types
//!
//! The collection a run builds, how it is delivered, and how the run ended.

use crate::error::Error;
use crate::graph::FriendRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Friend Collection
// ============================================================================

/// Ordered, append-only list of friends owned by one aggregation run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FriendCollection(Vec<FriendRecord>);

impl FriendCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of friends
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no friends have been collected
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Friend at `index`
    pub fn get(&self, index: usize) -> Option<&FriendRecord> {
        self.0.get(index)
    }

    /// Iterate in arrival order
    pub fn iter(&self) -> std::slice::Iter<'_, FriendRecord> {
        self.0.iter()
    }

    /// Borrow as a slice
    pub fn as_slice(&self) -> &[FriendRecord] {
        &self.0
    }

    /// Consume into the underlying vector
    pub fn into_vec(self) -> Vec<FriendRecord> {
        self.0
    }

    pub(crate) fn append(&mut self, records: Vec<FriendRecord>) {
        self.0.extend(records);
    }
}

impl IntoIterator for FriendCollection {
    type Item = FriendRecord;
    type IntoIter = std::vec::IntoIter<FriendRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'c> IntoIterator for &'c FriendCollection {
    type Item = &'c FriendRecord;
    type IntoIter = std::slice::Iter<'c, FriendRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ============================================================================
// Delivery Mode
// ============================================================================

/// Callback invoked after every invitable-friends page
pub type PageCallback<'a> = Box<dyn FnMut(&FriendCollection) + Send + 'a>;

/// Callback invoked once when the run ends
pub type CompletionCallback<'a> = Box<dyn FnOnce(&AggregationOutcome) + Send + 'a>;

/// How results reach the caller; exactly one callback per run
pub enum DeliveryMode<'a> {
    /// Deliver the growing collection after each page
    Incremental(PageCallback<'a>),
    /// Deliver the outcome once, after the last page
    Batch(CompletionCallback<'a>),
}

impl<'a> DeliveryMode<'a> {
    /// Incremental delivery
    pub fn incremental(on_each_page: impl FnMut(&FriendCollection) + Send + 'a) -> Self {
        Self::Incremental(Box::new(on_each_page))
    }

    /// Batch delivery
    pub fn batch(on_complete: impl FnOnce(&AggregationOutcome) + Send + 'a) -> Self {
        Self::Batch(Box::new(on_complete))
    }

    /// Check if this is incremental delivery
    pub fn is_incremental(&self) -> bool {
        matches!(self, Self::Incremental(_))
    }
}

impl std::fmt::Debug for DeliveryMode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Incremental(_) => f.write_str("Incremental(..)"),
            Self::Batch(_) => f.write_str("Batch(..)"),
        }
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Which remote source a page came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendSource {
    /// Friends already using the app
    Direct,
    /// Paginated invitable friends
    Invitable,
}

/// How an aggregation run ended
#[derive(Debug)]
pub enum AggregationStatus {
    /// Both sources finished
    Complete,
    /// Pagination finished but the direct-friends source failed
    Partial {
        /// Direct-friends failure
        cause: Error,
    },
    /// Pagination halted on an error; the collection holds what arrived before it
    Failed {
        /// Paginated-source failure
        cause: Error,
    },
}

impl AggregationStatus {
    /// Short status name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Partial { .. } => "partial",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Counters for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationStats {
    /// Invitable-friends pages received
    pub pages_fetched: u32,
    /// Records from the direct-friends source
    pub direct_records: usize,
    /// Records from the invitable-friends source
    pub invitable_records: usize,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Wall time of the run
    pub duration_ms: u64,
}

impl AggregationStats {
    pub(crate) fn started(started_at: DateTime<Utc>) -> Self {
        Self {
            pages_fetched: 0,
            direct_records: 0,
            invitable_records: 0,
            started_at,
            duration_ms: 0,
        }
    }

    /// Total records collected
    pub fn total_records(&self) -> usize {
        self.direct_records + self.invitable_records
    }
}

/// Result of an aggregation run
#[derive(Debug)]
pub struct AggregationOutcome {
    /// Everything collected, direct and invitable
    pub friends: FriendCollection,
    /// Terminal state
    pub status: AggregationStatus,
    /// Counters
    pub stats: AggregationStats,
}

impl AggregationOutcome {
    /// Both sources finished without error
    pub fn is_complete(&self) -> bool {
        matches!(self.status, AggregationStatus::Complete)
    }

    /// Pagination halted on an error
    pub fn is_failed(&self) -> bool {
        matches!(self.status, AggregationStatus::Failed { .. })
    }

    /// The error behind a partial or failed run
    pub fn error(&self) -> Option<&Error> {
        match &self.status {
            AggregationStatus::Complete => None,
            AggregationStatus::Partial { cause } | AggregationStatus::Failed { cause } => {
                Some(cause)
            }
        }
    }
}
