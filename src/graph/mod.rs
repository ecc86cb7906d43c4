//! Graph API module
//!
//! Data model for friend lists and profiles, the `GraphApi` capability the
//! aggregator depends on, and the HTTP-backed `GraphClient`.

mod client;
mod types;

pub use client::{GraphApi, GraphClient, PROFILE_FIELDS};
pub use types::{FriendRecord, PageResponse, ProfilePicture, UserProfile};
