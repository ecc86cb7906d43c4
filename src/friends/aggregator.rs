//! Friend aggregator
//!
//! Runs the two friend sources concurrently. Each source is a producer
//! that sends page results down a channel; a single consumer owns the
//! collection, so appends are serialized without shared mutable state.
//!
//! Invitable pages that arrive before the direct source has answered are
//! held back until it does, so every incremental snapshot already contains
//! the direct friends (unless that request failed).

use super::types::{
    AggregationOutcome, AggregationStats, AggregationStatus, CompletionCallback, DeliveryMode,
    FriendCollection, FriendSource, PageCallback,
};
use crate::config::FriendSourcesConfig;
use crate::error::{Error, Result};
use crate::graph::{GraphApi, PageResponse};
use crate::pagination::{NextUrlPaginator, NoPaginator, PageRequest, Pages, Paginator};
use crate::types::StringMap;
use chrono::Utc;
use std::collections::VecDeque;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const EVENT_BUFFER: usize = 16;

/// One page result from one source
struct SourceEvent {
    source: FriendSource,
    result: Result<PageResponse>,
}

/// Aggregates a user's friends from the direct and invitable sources
pub struct FriendAggregator<'a, A: GraphApi + ?Sized> {
    api: &'a A,
    sources: FriendSourcesConfig,
}

impl<'a, A: GraphApi + ?Sized> FriendAggregator<'a, A> {
    /// Create an aggregator over a pre-authenticated graph capability
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            sources: FriendSourcesConfig::default(),
        }
    }

    /// Override source paths and requested fields
    #[must_use]
    pub fn with_config(mut self, sources: FriendSourcesConfig) -> Self {
        self.sources = sources;
        self
    }

    /// Source configuration in use
    pub fn sources(&self) -> &FriendSourcesConfig {
        &self.sources
    }

    /// Fetch every friend, then call `on_complete` once with the outcome
    pub async fn fetch_all_friends<F>(&self, on_complete: F) -> AggregationOutcome
    where
        F: FnOnce(&AggregationOutcome) + Send,
    {
        self.run(DeliveryMode::batch(on_complete)).await
    }

    /// Fetch every friend, calling `on_each_page` after each invitable page
    pub async fn fetch_all_friends_incremental<F>(&self, on_each_page: F) -> AggregationOutcome
    where
        F: FnMut(&FriendCollection) + Send,
    {
        self.run(DeliveryMode::incremental(on_each_page)).await
    }

    /// Run one aggregation with the given delivery mode
    pub async fn run(&self, mode: DeliveryMode<'_>) -> AggregationOutcome {
        let started_at = Utc::now();
        let start = Instant::now();

        let (on_page, on_complete): (Option<PageCallback<'_>>, Option<CompletionCallback<'_>>) =
            match mode {
                DeliveryMode::Incremental(cb) => (Some(cb), None),
                DeliveryMode::Batch(cb) => (None, Some(cb)),
            };

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);

        let direct = self.produce(
            FriendSource::Direct,
            self.request(&self.sources.direct_path),
            NoPaginator,
            tx.clone(),
        );
        let invitable = self.produce(
            FriendSource::Invitable,
            self.request(&self.sources.invitable_path),
            NextUrlPaginator,
            tx,
        );
        let collector = Collector::new(started_at, on_page).drain(rx);

        let ((), (), collector) = tokio::join!(direct, invitable, collector);

        let mut outcome = collector.finish();
        outcome.stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            status = outcome.status.as_str(),
            friends = outcome.friends.len(),
            pages = outcome.stats.pages_fetched,
            duration_ms = outcome.stats.duration_ms,
            "Friend aggregation finished"
        );

        if let Some(on_complete) = on_complete {
            on_complete(&outcome);
        }

        outcome
    }

    fn request(&self, path: &str) -> PageRequest {
        let mut params = StringMap::new();
        let fields = self.sources.fields_param();
        if !fields.is_empty() {
            params.insert("fields".to_string(), fields);
        }
        PageRequest::query(path, params)
    }

    async fn produce(
        &self,
        source: FriendSource,
        first: PageRequest,
        paginator: impl Paginator + 'a,
        tx: mpsc::Sender<SourceEvent>,
    ) {
        let mut pages = Pages::new(self.api, first, paginator);
        while let Some(result) = pages.next_page().await {
            if tx.send(SourceEvent { source, result }).await.is_err() {
                break;
            }
        }
    }
}

impl<A: GraphApi + ?Sized> std::fmt::Debug for FriendAggregator<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FriendAggregator")
            .field("sources", &self.sources)
            .finish_non_exhaustive()
    }
}

/// Sole owner of the collection during a run
struct Collector<'c> {
    friends: FriendCollection,
    stats: AggregationStats,
    direct_error: Option<Error>,
    invitable_error: Option<Error>,
    direct_settled: bool,
    held: VecDeque<SourceEvent>,
    on_page: Option<PageCallback<'c>>,
}

impl<'c> Collector<'c> {
    fn new(started_at: chrono::DateTime<Utc>, on_page: Option<PageCallback<'c>>) -> Self {
        Self {
            friends: FriendCollection::new(),
            stats: AggregationStats::started(started_at),
            direct_error: None,
            invitable_error: None,
            direct_settled: false,
            held: VecDeque::new(),
            on_page,
        }
    }

    async fn drain(mut self, mut rx: mpsc::Receiver<SourceEvent>) -> Self {
        while let Some(event) = rx.recv().await {
            match event.source {
                FriendSource::Direct => {
                    self.apply(event);
                    self.direct_settled = true;
                    self.release_held();
                }
                FriendSource::Invitable if !self.direct_settled => {
                    debug!(held = self.held.len() + 1, "Holding invitable page for direct friends");
                    self.held.push_back(event);
                }
                FriendSource::Invitable => self.apply(event),
            }
        }
        // Direct producer ended without reporting
        self.release_held();
        self
    }

    fn release_held(&mut self) {
        while let Some(event) = self.held.pop_front() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: SourceEvent) {
        match (event.source, event.result) {
            (FriendSource::Direct, Ok(page)) => {
                debug!(records = page.len(), "Direct friends received");
                self.stats.direct_records += page.len();
                self.friends.append(page.records);
            }
            (FriendSource::Direct, Err(e)) => {
                warn!(error = %e, "Direct friends request failed, continuing without them");
                self.direct_error = Some(e);
            }
            (FriendSource::Invitable, Ok(page)) => {
                self.stats.pages_fetched += 1;
                self.stats.invitable_records += page.len();
                self.friends.append(page.records);
                debug!(
                    page = self.stats.pages_fetched,
                    total = self.friends.len(),
                    "Invitable friends page received"
                );
                if let Some(on_page) = self.on_page.as_mut() {
                    on_page(&self.friends);
                }
            }
            (FriendSource::Invitable, Err(e)) => {
                warn!(
                    error = %e,
                    collected = self.friends.len(),
                    "Invitable friends pagination halted"
                );
                self.invitable_error = Some(e);
            }
        }
    }

    fn finish(self) -> AggregationOutcome {
        let status = match (self.invitable_error, self.direct_error) {
            (Some(cause), _) => AggregationStatus::Failed { cause },
            (None, Some(cause)) => AggregationStatus::Partial { cause },
            (None, None) => AggregationStatus::Complete,
        };

        AggregationOutcome {
            friends: self.friends,
            status,
            stats: self.stats,
        }
    }
}
