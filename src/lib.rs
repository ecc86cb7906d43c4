// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # graph-friends
//!
//! Aggregates a user's friend list from the Facebook Graph API: the
//! friends already using the app plus the paginated invitable friends,
//! delivered either page-by-page or once at the end.
//!
//! ## Features
//!
//! - **Two sources, one collection**: direct and invitable friends fetched concurrently
//! - **Cursor pagination**: continuation URLs followed verbatim, iteratively
//! - **Incremental or batch delivery**: exactly one callback style per run
//! - **Explicit outcomes**: `Complete`, `Partial` or `Failed` with the cause
//! - **Profile helpers**: profile fields and picture download
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use graph_friends::{FriendAggregator, GraphClient, GraphConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = GraphConfig::default()
//!         .with_env_overrides()
//!         .with_access_token("EAAB...");
//!     let client = GraphClient::from_config(&config)?;
//!
//!     let outcome = FriendAggregator::new(&client)
//!         .fetch_all_friends_incremental(|friends| println!("{} so far", friends.len()))
//!         .await;
//!
//!     println!("{}: {} friends", outcome.status.as_str(), outcome.friends.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        FriendAggregator                         │
//! │  fetch_all_friends(on_complete)                                 │
//! │  fetch_all_friends_incremental(on_each_page)                    │
//! └─────────────────────────────────────────────────────────────────┘
//!          │ direct producer      │ invitable producer      ▲
//!          ▼                      ▼                         │ mpsc
//! ┌──────────────────┬───────────────────────┬──────────────┴──────┐
//! │      Pages       │       GraphApi        │      HttpClient     │
//! ├──────────────────┼───────────────────────┼─────────────────────┤
//! │ NextUrlPaginator │ query(path, params)   │ Retry / Backoff     │
//! │ NoPaginator      │ follow(cursor)        │ Rate Limit          │
//! │ resume(cursor)   │ profile / picture     │ access_token auth   │
//! └──────────────────┴───────────────────────┴─────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Access-token authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Configuration loading and validation
pub mod config;

/// Graph API data model and client
pub mod graph;

/// Cursor pagination
pub mod pagination;

/// Friend aggregation
pub mod friends;

/// Command-line interface
pub mod cli;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::GraphConfig;
pub use friends::{
    AggregationOutcome, AggregationStatus, DeliveryMode, FriendAggregator, FriendCollection,
};
pub use graph::{FriendRecord, GraphApi, GraphClient};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
