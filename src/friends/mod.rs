//! Friend aggregation
//!
//! Collects the session user's friends from two Graph sources:
//!
//! - **Direct** (`/me/friends`): friends already using the app, one request.
//!   A failure here is logged and the run continues.
//! - **Invitable** (`/me/invitable_friends`): every friend, paginated by
//!   continuation cursor until the server stops sending one.
//!
//! Results are delivered either after every invitable page
//! ([`DeliveryMode::Incremental`]) or once at the end
//! ([`DeliveryMode::Batch`]). Either way the run returns an
//! [`AggregationOutcome`] whose status tells a finished run apart from one
//! that halted on an error.
//!
//! Records are not deduplicated across the two sources.

mod aggregator;
mod types;

pub use aggregator::FriendAggregator;
pub use types::{
    AggregationOutcome, AggregationStats, AggregationStatus, CompletionCallback, DeliveryMode,
    FriendCollection, FriendSource, PageCallback,
};
