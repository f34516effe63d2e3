use std::sync::Arc;

use super::filters::PostFilterComposer;
use super::mutations::Mutations;
use super::notify::{Notifier, ToastQueue};
use super::query::Queries;
use crate::api::{ApiError, HttpClient};
use crate::cache::QueryCache;
use crate::config::Settings;

/// Wires one HTTP client and one cache into the query and mutation services.
#[derive(Clone)]
pub struct AdminClient {
    pub queries: Queries,
    pub mutations: Mutations,
    cache: Arc<QueryCache>,
    toasts: Arc<ToastQueue>,
}

impl AdminClient {
    pub fn new(http: HttpClient, cache: Arc<QueryCache>) -> Self {
        let toasts = Arc::new(ToastQueue::new());
        let notifier: Arc<dyn Notifier> = toasts.clone();
        Self {
            queries: Queries::new(http.clone(), Arc::clone(&cache)),
            mutations: Mutations::new(http, Arc::clone(&cache), notifier),
            cache,
            toasts,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        let http = HttpClient::from_settings(&settings.api)?;
        let cache = Arc::new(QueryCache::new(&settings.cache));
        Ok(Self::new(http, cache))
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }
}

/// A posts-list composer sized from configuration.
pub fn post_filters(settings: &Settings) -> PostFilterComposer {
    PostFilterComposer::new(settings.filters.search_debounce, settings.filters.page_size)
}
