//! Pagination module
//!
//! Supports: Next URL (continuation cursor), single request
//!
//! # Overview
//!
//! A `Paginator` decides from each page whether another follows. `Pages`
//! drives the request loop lazily and can be resumed from any cursor.

mod pages;
mod strategies;
mod types;

pub use pages::Pages;
pub use strategies::{NextUrlPaginator, NoPaginator};
pub use types::{Cursor, NextPage, PageRequest, PaginationState, Paginator};
