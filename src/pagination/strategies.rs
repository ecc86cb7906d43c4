//! Pagination strategy implementations

use super::types::{NextPage, PaginationState, Paginator};
use crate::graph::PageResponse;

// ============================================================================
// Next URL Pagination
// ============================================================================

/// Follows the `paging.next` URL until the server stops sending one
///
/// Record counts play no part in the decision: an empty page that still
/// carries a cursor keeps pagination going.
#[derive(Debug, Clone, Copy, Default)]
pub struct NextUrlPaginator;

impl Paginator for NextUrlPaginator {
    fn process_page(&self, page: &PageResponse, state: &mut PaginationState) -> NextPage {
        state.add_page(page.len());

        match &page.next {
            Some(cursor) => {
                state.set_cursor(cursor.clone());
                NextPage::Continue(cursor.clone())
            }
            None => {
                state.mark_done();
                NextPage::Done
            }
        }
    }
}

// ============================================================================
// No Pagination
// ============================================================================

/// No pagination - single request, any cursor is ignored
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPaginator;

impl Paginator for NoPaginator {
    fn process_page(&self, page: &PageResponse, state: &mut PaginationState) -> NextPage {
        state.add_page(page.len());
        state.mark_done();
        NextPage::Done
    }
}
