//! Lazy page sequence
//!
//! `Pages` issues one request per `next_page` call and follows cursors in a
//! loop, so arbitrarily long chains never grow the call stack. It can be
//! restarted from any cursor with [`Pages::resume`].

use super::types::{Cursor, NextPage, PageRequest, PaginationState, Paginator};
use crate::error::Result;
use crate::graph::{GraphApi, PageResponse};
use crate::http::redact_query;
use futures::Stream;
use tracing::{debug, warn};

/// Lazy, restartable sequence of pages from one source
pub struct Pages<'a, A: GraphApi + ?Sized> {
    api: &'a A,
    paginator: Box<dyn Paginator + 'a>,
    pending: Option<PageRequest>,
    halted_at: Option<PageRequest>,
    state: PaginationState,
}

impl<'a, A: GraphApi + ?Sized> Pages<'a, A> {
    /// Start a sequence with `first` as the initial request
    pub fn new(api: &'a A, first: PageRequest, paginator: impl Paginator + 'a) -> Self {
        Self {
            api,
            paginator: Box::new(paginator),
            pending: Some(first),
            halted_at: None,
            state: PaginationState::new(),
        }
    }

    /// Restart a sequence from a previously seen cursor
    pub fn resume(api: &'a A, cursor: Cursor, paginator: impl Paginator + 'a) -> Self {
        Self::new(api, PageRequest::follow(cursor), paginator)
    }

    /// Fetch the next page
    ///
    /// Returns `None` once the last page has been returned or after an
    /// error. An error halts the sequence; the failed request is kept in
    /// [`Pages::halted_at`].
    pub async fn next_page(&mut self) -> Option<Result<PageResponse>> {
        let request = self.pending.take()?;

        match request.send(self.api).await {
            Ok(page) => {
                match self.paginator.process_page(&page, &mut self.state) {
                    NextPage::Continue(cursor) => {
                        debug!(
                            page = self.state.pages_fetched,
                            records = page.len(),
                            next = redact_query(cursor.as_str()),
                            "Page fetched, continuing"
                        );
                        self.pending = Some(PageRequest::follow(cursor));
                    }
                    NextPage::Done => {
                        debug!(
                            page = self.state.pages_fetched,
                            records = page.len(),
                            "Last page fetched"
                        );
                    }
                }
                Some(Ok(page))
            }
            Err(e) => {
                warn!(
                    page = self.state.pages_fetched + 1,
                    error = %e,
                    "Page request failed, halting pagination"
                );
                self.halted_at = Some(request);
                Some(Err(e))
            }
        }
    }

    /// Pagination progress so far
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// The request that failed, if the sequence halted on an error
    pub fn halted_at(&self) -> Option<&PageRequest> {
        self.halted_at.as_ref()
    }

    /// The request `next_page` will issue, if any
    pub fn pending(&self) -> Option<&PageRequest> {
        self.pending.as_ref()
    }

    /// Whether the sequence has nothing more to yield
    pub fn is_finished(&self) -> bool {
        self.pending.is_none()
    }

    /// Adapt into a `futures::Stream` of pages
    pub fn into_stream(self) -> impl Stream<Item = Result<PageResponse>> + 'a
    where
        A: 'a,
    {
        futures::stream::unfold(self, |mut pages| async move {
            pages.next_page().await.map(|item| (item, pages))
        })
    }
}

impl<A: GraphApi + ?Sized> std::fmt::Debug for Pages<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pages")
            .field("pending", &self.pending.is_some())
            .field("halted", &self.halted_at.is_some())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
