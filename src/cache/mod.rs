//! Query cache for the admin client.
//!
//! Server state is cached per key and refreshed on demand:
//!
//! - **Lists** are keyed by resource and the full filter set.
//! - **Details** are keyed by resource and id.
//!
//! Mutations never write into the cache directly. A successful write is
//! turned into an [`InvalidationPlan`] that marks the affected entries stale
//! (or removes them), and the next read refetches.
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! list_limit = 50
//! detail_limit = 200
//! ```

mod config;
mod events;
mod keys;
mod lock;
mod planner;
mod store;
mod value;

pub use config::CacheConfig;
pub use events::{Epoch, MutationEvent, MutationKind};
pub use keys::{CacheKey, KeyScope, ListFilter, ResourceKind};
pub(crate) use lock::mutex_lock;
pub use planner::InvalidationPlan;
pub use store::{
    CacheLookup, EntrySnapshot, FetchError, FetchStatus, PendingFetch, QueryCache, Ticket,
};
pub use value::{Cacheable, CachedValue};
