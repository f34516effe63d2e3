use std::future::Future;
use std::sync::Arc;

use blogdesk_api_types::{Category, Post, PostListResponse, Tag};
use tracing::{debug, warn};

use super::state::QueryResult;
use crate::api::{ApiError, HttpClient, PostListParams};
use crate::cache::{CacheKey, CacheLookup, Cacheable, FetchError, QueryCache, ResourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Serve fresh entries from cache; fetch missing or stale ones.
    #[default]
    CacheFirst,
    /// Always issue a request.
    NetworkOnly,
}

/// Read side of the admin client.
#[derive(Clone)]
pub struct Queries {
    http: HttpClient,
    cache: Arc<QueryCache>,
    policy: FetchPolicy,
}

impl Queries {
    pub fn new(http: HttpClient, cache: Arc<QueryCache>) -> Self {
        Self {
            http,
            cache,
            policy: FetchPolicy::CacheFirst,
        }
    }

    /// The same service, but every read goes to the network. This is the
    /// retry affordance for failed reads.
    pub fn refetch(&self) -> Self {
        Self {
            policy: FetchPolicy::NetworkOnly,
            ..self.clone()
        }
    }

    pub fn policy(&self) -> FetchPolicy {
        self.policy
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    pub async fn posts(&self, params: &PostListParams) -> QueryResult<PostListResponse> {
        let key = CacheKey::list(ResourceKind::Posts, params);
        self.read(key, self.http.posts().list(params)).await
    }

    pub async fn post(&self, id: &str) -> QueryResult<Post> {
        let key = CacheKey::detail(ResourceKind::Posts, id);
        self.read(key, self.http.posts().get(id)).await
    }

    pub async fn categories(&self) -> QueryResult<Vec<Category>> {
        let key = CacheKey::list(ResourceKind::Categories, &());
        self.read(key, self.http.categories().list()).await
    }

    pub async fn category(&self, id: i64) -> QueryResult<Category> {
        let key = CacheKey::detail(ResourceKind::Categories, id);
        self.read(key, self.http.categories().get(id)).await
    }

    pub async fn tags(&self) -> QueryResult<Vec<Tag>> {
        let key = CacheKey::list(ResourceKind::Tags, &());
        self.read(key, self.http.tags().list()).await
    }

    pub async fn tag(&self, id: i64) -> QueryResult<Tag> {
        let key = CacheKey::detail(ResourceKind::Tags, id);
        self.read(key, self.http.tags().get(id)).await
    }

    /// `fetch` is only polled when the cache cannot answer.
    async fn read<T, F>(&self, key: CacheKey, fetch: F) -> QueryResult<T>
    where
        T: Cacheable,
        F: Future<Output = Result<T, ApiError>>,
    {
        if self.policy == FetchPolicy::CacheFirst {
            match self.cache.lookup::<T>(&key) {
                CacheLookup::Fresh(value) => {
                    debug!(key = %key, "served from cache");
                    return QueryResult::loaded(value);
                }
                CacheLookup::NotFound => {
                    debug!(key = %key, "entry known to be absent");
                    return QueryResult::failed(not_found(&key), None);
                }
                CacheLookup::Failed(err) => {
                    let data = self.cache.peek::<T>(&key);
                    return QueryResult::failed(err.message, data);
                }
                CacheLookup::Missing | CacheLookup::Loading | CacheLookup::Stale(_) => {}
            }
        }

        let pending = self.cache.begin(&key);
        let outcome = match fetch.await {
            Ok(value) => Ok(value.into_cached()),
            Err(err) => {
                warn!(key = %key, error = %err, "query failed");
                Err(FetchError::from(&err))
            }
        };
        let not_found_response = matches!(&outcome, Err(err) if err.not_found);
        pending.resolve(outcome);

        if self.cache.is_removed(&key) {
            return QueryResult::failed(not_found(&key), None);
        }
        let mut result = QueryResult::from(self.cache.snapshot::<T>(&key));
        // An entity the server reports absent has nothing left to display.
        if not_found_response && result.error.is_some() {
            result.data = None;
        }
        result
    }
}

fn not_found(key: &CacheKey) -> String {
    format!("{} not found", key.resource.title())
}
