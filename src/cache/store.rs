//! Key-addressed query cache.
//!
//! Lists and details live in separate LRU maps. Every fetch takes a ticket
//! from a monotonic epoch counter; a resolution is applied only when its
//! ticket is newer than the last one applied to the entry, so a slow
//! response can never overwrite a fresher one that already landed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use lru::LruCache;
use metrics::counter;
use tracing::{debug, info};

use super::config::CacheConfig;
use super::events::{Epoch, MutationEvent, MutationKind};
use super::keys::{CacheKey, ResourceKind};
use super::lock::{rw_read, rw_write};
use super::planner::InvalidationPlan;
use super::value::{Cacheable, CachedValue};
use crate::api::ApiError;

const SOURCE: &str = "cache::store";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// A failed read as remembered by the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub message: String,
    pub not_found: bool,
}

impl From<&ApiError> for FetchError {
    fn from(err: &ApiError) -> Self {
        Self {
            message: err.to_string(),
            not_found: err.is_not_found(),
        }
    }
}

/// Result of a cache lookup that does not touch the network.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup<T> {
    /// Never fetched, or evicted.
    Missing,
    /// First fetch still in flight.
    Loading,
    Fresh(T),
    /// Invalidated; the value is still displayable until the refetch lands.
    Stale(T),
    Failed(FetchError),
    /// Removed after a delete, or reported absent by the server.
    NotFound,
}

/// Point-in-time view of one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySnapshot<T> {
    pub data: Option<T>,
    pub status: FetchStatus,
    pub error: Option<FetchError>,
    pub stale: bool,
}

impl<T> Default for EntrySnapshot<T> {
    fn default() -> Self {
        Self {
            data: None,
            status: FetchStatus::Idle,
            error: None,
            stale: false,
        }
    }
}

#[derive(Debug)]
struct Entry {
    value: Option<CachedValue>,
    status: FetchStatus,
    error: Option<FetchError>,
    stale: bool,
    in_flight: u32,
    applied: Epoch,
    invalidated: Epoch,
}

impl Entry {
    fn idle() -> Self {
        Self {
            value: None,
            status: FetchStatus::Idle,
            error: None,
            stale: false,
            in_flight: 0,
            applied: 0,
            invalidated: 0,
        }
    }

    fn settle_status(&mut self) {
        self.status = if self.in_flight > 0 {
            FetchStatus::Loading
        } else if self.error.is_some() {
            FetchStatus::Error
        } else if self.value.is_some() {
            FetchStatus::Success
        } else {
            FetchStatus::Idle
        };
    }

    fn mark_stale(&mut self, epoch: Epoch) {
        self.stale = true;
        self.invalidated = epoch;
    }
}

/// Identifies one issued fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    key: CacheKey,
    epoch: Epoch,
}

impl Ticket {
    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }
}

/// An in-flight fetch. Dropping it unresolved releases its loading state.
#[derive(Debug)]
pub struct PendingFetch {
    cache: Arc<QueryCache>,
    ticket: Option<Ticket>,
}

impl PendingFetch {
    pub fn ticket(&self) -> Option<&Ticket> {
        self.ticket.as_ref()
    }

    /// Store the outcome. Returns `false` when a newer resolution, or a
    /// removal, already superseded this fetch.
    pub fn resolve(mut self, outcome: Result<CachedValue, FetchError>) -> bool {
        match self.ticket.take() {
            Some(ticket) => self.cache.resolve(ticket, outcome),
            None => false,
        }
    }
}

impl Drop for PendingFetch {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.cache.abandon(&ticket);
        }
    }
}

/// Query cache shared by query and mutation services.
#[derive(Debug)]
pub struct QueryCache {
    epoch: AtomicU64,
    lists: RwLock<LruCache<CacheKey, Entry>>,
    details: RwLock<LruCache<CacheKey, Entry>>,
    /// Tombstones of deleted details, bounded like the detail map.
    removed: RwLock<LruCache<CacheKey, Epoch>>,
}

impl QueryCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            epoch: AtomicU64::new(1),
            lists: RwLock::new(LruCache::new(config.list_limit_non_zero())),
            details: RwLock::new(LruCache::new(config.detail_limit_non_zero())),
            removed: RwLock::new(LruCache::new(config.detail_limit_non_zero())),
        }
    }

    fn next_epoch(&self) -> Epoch {
        self.epoch.fetch_add(1, Ordering::SeqCst)
    }

    fn map(&self, key: &CacheKey) -> &RwLock<LruCache<CacheKey, Entry>> {
        if key.is_list() {
            &self.lists
        } else {
            &self.details
        }
    }

    /// Register a new fetch for `key` and move the entry to loading.
    pub fn begin(self: &Arc<Self>, key: &CacheKey) -> PendingFetch {
        let epoch = self.next_epoch();
        let mut map = rw_write(self.map(key), SOURCE, "begin");
        match map.get_mut(key) {
            Some(entry) => {
                entry.in_flight += 1;
                entry.status = FetchStatus::Loading;
            }
            None => {
                let mut entry = Entry::idle();
                entry.in_flight = 1;
                entry.status = FetchStatus::Loading;
                if let Some((evicted, _)) = map.push(key.clone(), entry) {
                    debug!(key = %evicted, "cache entry evicted");
                    counter!("blogdesk_cache_evict_total", "resource" => evicted.resource.as_str())
                        .increment(1);
                }
            }
        }
        PendingFetch {
            cache: Arc::clone(self),
            ticket: Some(Ticket {
                key: key.clone(),
                epoch,
            }),
        }
    }

    fn resolve(&self, ticket: Ticket, outcome: Result<CachedValue, FetchError>) -> bool {
        let key = &ticket.key;
        let removed_at = rw_read(&self.removed, SOURCE, "resolve.removed")
            .peek(key)
            .copied();
        if removed_at.is_some_and(|at| ticket.epoch <= at) {
            debug!(key = %key, epoch = ticket.epoch, "response discarded: entry removed");
            return false;
        }

        let succeeded = outcome.is_ok();
        {
            let mut map = rw_write(self.map(key), SOURCE, "resolve");
            if !map.contains(key) {
                map.push(key.clone(), Entry::idle());
            }
            let Some(entry) = map.get_mut(key) else {
                return false;
            };
            entry.in_flight = entry.in_flight.saturating_sub(1);

            if ticket.epoch <= entry.applied {
                debug!(
                    key = %key,
                    epoch = ticket.epoch,
                    applied = entry.applied,
                    "response discarded: newer response already applied"
                );
                entry.settle_status();
                return false;
            }

            entry.applied = ticket.epoch;
            match outcome {
                Ok(value) => {
                    entry.value = Some(value);
                    entry.error = None;
                    entry.stale = ticket.epoch < entry.invalidated;
                }
                Err(err) => entry.error = Some(err),
            }
            entry.settle_status();
        }

        if succeeded && removed_at.is_some() {
            rw_write(&self.removed, SOURCE, "resolve.revive").pop(key);
        }
        true
    }

    fn abandon(&self, ticket: &Ticket) {
        let mut map = rw_write(self.map(&ticket.key), SOURCE, "abandon");
        if let Some(entry) = map.get_mut(&ticket.key) {
            entry.in_flight = entry.in_flight.saturating_sub(1);
            entry.settle_status();
        }
    }

    pub fn lookup<T: Cacheable>(&self, key: &CacheKey) -> CacheLookup<T> {
        let lookup = self.lookup_inner(key);
        let outcome = if matches!(lookup, CacheLookup::Fresh(_)) {
            "hit"
        } else {
            "miss"
        };
        counter!("blogdesk_cache_lookup_total", "resource" => key.resource.as_str(), "outcome" => outcome)
            .increment(1);
        lookup
    }

    fn lookup_inner<T: Cacheable>(&self, key: &CacheKey) -> CacheLookup<T> {
        if self.is_removed(key) {
            return CacheLookup::NotFound;
        }

        let mut map = rw_write(self.map(key), SOURCE, "lookup");
        let Some(entry) = map.get(key) else {
            return CacheLookup::Missing;
        };

        // A stale failure is retried like any other stale entry.
        if let Some(err) = entry.error.as_ref().filter(|_| !entry.stale) {
            return if err.not_found {
                CacheLookup::NotFound
            } else {
                CacheLookup::Failed(err.clone())
            };
        }

        match entry.value.as_ref().and_then(T::from_cached) {
            Some(value) if entry.stale => CacheLookup::Stale(value),
            Some(value) => CacheLookup::Fresh(value),
            None if entry.status == FetchStatus::Loading => CacheLookup::Loading,
            None => CacheLookup::Missing,
        }
    }

    pub fn snapshot<T: Cacheable>(&self, key: &CacheKey) -> EntrySnapshot<T> {
        let map = rw_read(self.map(key), SOURCE, "snapshot");
        match map.peek(key) {
            Some(entry) => EntrySnapshot {
                data: entry.value.as_ref().and_then(T::from_cached),
                status: entry.status,
                error: entry.error.clone(),
                stale: entry.stale,
            },
            None => EntrySnapshot::default(),
        }
    }

    /// Read a cached value without affecting recency or counters.
    pub fn peek<T: Cacheable>(&self, key: &CacheKey) -> Option<T> {
        rw_read(self.map(key), SOURCE, "peek")
            .peek(key)
            .and_then(|entry| entry.value.as_ref())
            .and_then(T::from_cached)
    }

    /// Whether `key` was removed by a delete and not fetched successfully since.
    pub fn is_removed(&self, key: &CacheKey) -> bool {
        rw_read(&self.removed, SOURCE, "is_removed").contains(key)
    }

    pub fn is_stale(&self, key: &CacheKey) -> bool {
        rw_read(self.map(key), SOURCE, "is_stale")
            .peek(key)
            .is_some_and(|entry| entry.stale)
    }

    /// Mark every list entry of `resource` stale.
    pub fn invalidate_lists(&self, resource: ResourceKind) {
        let epoch = self.next_epoch();
        self.stale_where(&self.lists, epoch, |key| key.resource == resource);
    }

    /// Mark every detail entry of `resource` stale.
    pub fn invalidate_details(&self, resource: ResourceKind) {
        let epoch = self.next_epoch();
        self.stale_where(&self.details, epoch, |key| key.resource == resource);
    }

    pub fn invalidate(&self, key: &CacheKey) {
        let epoch = self.next_epoch();
        if let Some(entry) = rw_write(self.map(key), SOURCE, "invalidate").peek_mut(key) {
            entry.mark_stale(epoch);
        }
    }

    /// Drop an entry; later lookups report [`CacheLookup::NotFound`].
    pub fn remove(&self, key: &CacheKey) {
        let epoch = self.next_epoch();
        rw_write(self.map(key), SOURCE, "remove").pop(key);
        let evicted = rw_write(&self.removed, SOURCE, "remove.tombstone").push(key.clone(), epoch);
        if let Some((expired, _)) = evicted.filter(|(expired, _)| expired != key) {
            debug!(key = %expired, "tombstone evicted");
        }
    }

    fn stale_where(
        &self,
        map: &RwLock<LruCache<CacheKey, Entry>>,
        epoch: Epoch,
        matches: impl Fn(&CacheKey) -> bool,
    ) {
        let mut map = rw_write(map, SOURCE, "stale_where");
        for (key, entry) in map.iter_mut() {
            if matches(key) {
                entry.mark_stale(epoch);
            }
        }
    }

    /// Apply the invalidations implied by a successful mutation.
    pub fn apply_mutation(&self, kind: MutationKind) -> InvalidationPlan {
        let event = MutationEvent::new(kind, self.next_epoch());
        let plan = InvalidationPlan::for_mutation(&event.kind);

        for resource in &plan.stale_lists {
            self.invalidate_lists(*resource);
        }
        for resource in &plan.stale_details {
            self.invalidate_details(*resource);
        }
        for key in &plan.stale_keys {
            self.invalidate(key);
        }
        for key in &plan.remove_keys {
            self.remove(key);
        }

        info!(
            event_id = %event.id,
            event_epoch = event.epoch,
            event_kind = ?event.kind,
            plan = %plan,
            "Cache invalidated after mutation"
        );
        counter!(
            "blogdesk_cache_invalidation_total",
            "resource" => event.kind.resource().as_str(),
            "mutation" => event.kind.verb()
        )
        .increment(1);

        plan
    }

    pub fn len(&self) -> usize {
        rw_read(&self.lists, SOURCE, "len.lists").len()
            + rw_read(&self.details, SOURCE, "len.details").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all cached data.
    pub fn clear(&self) {
        rw_write(&self.lists, SOURCE, "clear.lists").clear();
        rw_write(&self.details, SOURCE, "clear.details").clear();
        rw_write(&self.removed, SOURCE, "clear.removed").clear();
    }
}
