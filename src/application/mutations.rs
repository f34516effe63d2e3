//! Write side of the admin client.
//!
//! Every mutation ends in exactly one toast. On success the cache is
//! invalidated according to the mutation's plan; on failure the cache is
//! left exactly as it was.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use blogdesk_api_types::{
    Category, CreateCategoryRequest, CreatePostRequest, CreateTagRequest, Post, Tag,
    UpdateCategoryRequest, UpdatePostRequest, UpdateTagRequest,
};
use tracing::warn;

use super::notify::{Notifier, Toast};
use crate::api::{ApiError, HttpClient};
use crate::cache::{MutationKind, QueryCache, ResourceKind};
use crate::domain::validation::Validated;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Create,
    Update,
    Delete,
}

impl Op {
    fn as_str(self) -> &'static str {
        match self {
            Op::Create => "create",
            Op::Update => "update",
            Op::Delete => "delete",
        }
    }
}

/// Toast text used when the server did not explain a failure.
fn fallback_message(resource: ResourceKind, op: Op) -> String {
    let verb = match (resource, op) {
        (ResourceKind::Tags, Op::Update) => "edit",
        (_, op) => op.as_str(),
    };
    format!("Failed to {verb} {}", resource.label())
}

fn saved_message(resource: ResourceKind, name: &str, verb: &str) -> String {
    format!("{} \"{name}\" {verb} successfully", resource.title())
}

struct PendingGuard(Arc<AtomicUsize>);

impl PendingGuard {
    fn new(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct Mutations {
    http: HttpClient,
    cache: Arc<QueryCache>,
    notifier: Arc<dyn Notifier>,
    pending: Arc<AtomicUsize>,
}

impl Mutations {
    pub fn new(http: HttpClient, cache: Arc<QueryCache>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            http,
            cache,
            notifier,
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Whether any mutation issued through this service is still running.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    pub async fn create_post(&self, payload: Validated<CreatePostRequest>) -> Result<Post, ApiError> {
        let api = self.http.posts();
        let request = api.create(payload.get());
        self.execute(ResourceKind::Posts, Op::Create, request, |post: &Post| {
            (
                MutationKind::created(ResourceKind::Posts, &post.id),
                saved_message(ResourceKind::Posts, &post.title, "created"),
            )
        })
        .await
    }

    pub async fn update_post(
        &self,
        id: &str,
        payload: Validated<UpdatePostRequest>,
    ) -> Result<Post, ApiError> {
        let api = self.http.posts();
        let request = api.update(id, payload.get());
        self.execute(ResourceKind::Posts, Op::Update, request, |post: &Post| {
            (
                MutationKind::updated(ResourceKind::Posts, &post.id),
                saved_message(ResourceKind::Posts, &post.title, "updated"),
            )
        })
        .await
    }

    pub async fn delete_post(&self, id: &str) -> Result<String, ApiError> {
        let api = self.http.posts();
        let request = api.delete(id);
        self.execute(ResourceKind::Posts, Op::Delete, request, |message: &String| {
            (MutationKind::deleted(ResourceKind::Posts, id), message.clone())
        })
        .await
    }

    pub async fn create_category(
        &self,
        payload: Validated<CreateCategoryRequest>,
    ) -> Result<Category, ApiError> {
        let api = self.http.categories();
        let request = api.create(payload.get());
        self.execute(ResourceKind::Categories, Op::Create, request, |category: &Category| {
            (
                MutationKind::created(ResourceKind::Categories, category.id),
                saved_message(ResourceKind::Categories, &category.name, "created"),
            )
        })
        .await
    }

    pub async fn update_category(
        &self,
        id: i64,
        payload: Validated<UpdateCategoryRequest>,
    ) -> Result<Category, ApiError> {
        let api = self.http.categories();
        let request = api.update(id, payload.get());
        self.execute(ResourceKind::Categories, Op::Update, request, |category: &Category| {
            (
                MutationKind::updated(ResourceKind::Categories, category.id),
                saved_message(ResourceKind::Categories, &category.name, "updated"),
            )
        })
        .await
    }

    pub async fn delete_category(&self, id: i64) -> Result<String, ApiError> {
        let api = self.http.categories();
        let request = api.delete(id);
        self.execute(ResourceKind::Categories, Op::Delete, request, |message: &String| {
            (MutationKind::deleted(ResourceKind::Categories, id), message.clone())
        })
        .await
    }

    pub async fn create_tag(&self, payload: Validated<CreateTagRequest>) -> Result<Tag, ApiError> {
        let api = self.http.tags();
        let request = api.create(payload.get());
        self.execute(ResourceKind::Tags, Op::Create, request, |tag: &Tag| {
            (
                MutationKind::created(ResourceKind::Tags, tag.id),
                saved_message(ResourceKind::Tags, &tag.name, "created"),
            )
        })
        .await
    }

    pub async fn update_tag(
        &self,
        id: i64,
        payload: Validated<UpdateTagRequest>,
    ) -> Result<Tag, ApiError> {
        let api = self.http.tags();
        let request = api.update(id, payload.get());
        self.execute(ResourceKind::Tags, Op::Update, request, |tag: &Tag| {
            (
                MutationKind::updated(ResourceKind::Tags, tag.id),
                saved_message(ResourceKind::Tags, &tag.name, "updated"),
            )
        })
        .await
    }

    pub async fn delete_tag(&self, id: i64) -> Result<String, ApiError> {
        let api = self.http.tags();
        let request = api.delete(id);
        self.execute(ResourceKind::Tags, Op::Delete, request, |message: &String| {
            (MutationKind::deleted(ResourceKind::Tags, id), message.clone())
        })
        .await
    }

    async fn execute<T, F>(
        &self,
        resource: ResourceKind,
        op: Op,
        request: F,
        on_success: impl FnOnce(&T) -> (MutationKind, String),
    ) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let _pending = PendingGuard::new(&self.pending);
        match request.await {
            Ok(value) => {
                let (kind, text) = on_success(&value);
                self.cache.apply_mutation(kind);
                self.notifier.notify(Toast::success(text));
                Ok(value)
            }
            Err(err) => {
                warn!(
                    resource = resource.as_str(),
                    op = op.as_str(),
                    error = %err,
                    "mutation failed"
                );
                let text = err
                    .server_message()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| fallback_message(resource, op));
                self.notifier.notify(Toast::error(text));
                Err(err)
            }
        }
    }
}
