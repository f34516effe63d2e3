//! Cache behaviour observed through the admin client against a mock API.

use std::sync::Arc;
use std::time::Duration;

use blogdesk::api::{HttpClient, PostListParams};
use blogdesk::application::AdminClient;
use blogdesk::application::notify::ToastKind;
use blogdesk::cache::{
    CacheConfig, CacheKey, CacheLookup, Cacheable, FetchStatus, QueryCache, ResourceKind,
};
use blogdesk::domain::validation::{validate_create_tag, validate_update_category};
use blogdesk_api_types::{CreateTagRequest, Post, Tag, UpdateCategoryRequest};
use httpmock::MockServer;
use serde_json::json;
use time::OffsetDateTime;

const STAMP: &str = "2026-03-01T12:00:00Z";

fn admin(server: &MockServer) -> AdminClient {
    let http = HttpClient::new(&format!("{}/api", server.base_url()), Duration::from_secs(5))
        .expect("client should build");
    AdminClient::new(http, Arc::new(QueryCache::new(&CacheConfig::default())))
}

fn tag_json(id: i64, name: &str) -> serde_json::Value {
    json!({ "id": id, "name": name, "createdAt": STAMP, "updatedAt": STAMP, "postCount": 0 })
}

fn category_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id, "name": name, "description": "desc",
        "createdAt": STAMP, "updatedAt": STAMP, "postCount": 1
    })
}

fn post_json(id: &str, category: &str) -> serde_json::Value {
    json!({
        "id": id, "title": "Cached post", "slug": "cached-post",
        "content": "<p>body</p>", "excerpt": "excerpt", "categoryId": 1,
        "readTime": 1, "createdAt": STAMP, "updatedAt": STAMP,
        "category": category_json(1, category), "tags": []
    })
}

fn page_json(posts: Vec<serde_json::Value>) -> serde_json::Value {
    let total = posts.len();
    json!({
        "data": posts,
        "pagination": {
            "page": 1, "limit": 5, "total": total, "totalPages": 1,
            "hasNext": false, "hasPrev": false
        }
    })
}

fn tag(id: i64, name: &str) -> Tag {
    Tag {
        id,
        name: name.to_string(),
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
        post_count: 0,
    }
}

#[tokio::test]
async fn created_tag_is_listed_after_refetch() {
    let server = MockServer::start();
    let mut empty = server.mock(|when, then| {
        when.method("GET").path("/api/tags");
        then.status(200).json_body(json!({ "data": [] }));
    });
    let create = server.mock(|when, then| {
        when.method("POST").path("/api/tags");
        then.status(201).json_body(json!({ "data": tag_json(3, "rust") }));
    });

    let admin = admin(&server);
    let before = admin.queries.tags().await;
    assert_eq!(before.data, Some(Vec::new()));

    let payload = validate_create_tag(CreateTagRequest {
        name: "rust".into(),
    })
    .expect("valid tag");
    admin
        .mutations
        .create_tag(payload)
        .await
        .expect("tag should be created");
    create.assert();

    let key = CacheKey::list(ResourceKind::Tags, &());
    assert!(admin.cache().is_stale(&key));

    empty.delete();
    let listed = server.mock(|when, then| {
        when.method("GET").path("/api/tags");
        then.status(200)
            .json_body(json!({ "data": [tag_json(3, "rust")] }));
    });

    let after = admin.queries.tags().await;
    listed.assert();
    let names: Vec<String> = after
        .data
        .expect("tags after refetch")
        .into_iter()
        .map(|tag| tag.name)
        .collect();
    assert_eq!(names, vec!["rust".to_string()]);

    let toasts = admin.toasts().drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Success);
    assert!(toasts[0].text.contains("rust"));
}

#[tokio::test]
async fn deleted_post_reads_as_not_found() {
    let server = MockServer::start();
    let detail = server.mock(|when, then| {
        when.method("GET").path("/api/posts/p1");
        then.status(200).json_body(json!({ "data": post_json("p1", "News") }));
    });
    server.mock(|when, then| {
        when.method("GET").path("/api/posts");
        then.status(200).json_body(page_json(vec![post_json("p1", "News")]));
    });
    let delete = server.mock(|when, then| {
        when.method("DELETE").path("/api/posts/p1");
        then.status(200)
            .json_body(json!({ "message": "Post deleted successfully" }));
    });

    let admin = admin(&server);
    let first_page = PostListParams {
        page: Some(1),
        limit: Some(5),
        ..Default::default()
    };
    let by_category = PostListParams {
        category_id: Some(2),
        ..first_page.clone()
    };
    assert!(admin.queries.post("p1").await.data.is_some());
    assert!(admin.queries.posts(&first_page).await.data.is_some());
    assert!(admin.queries.posts(&by_category).await.data.is_some());

    let message = admin.mutations.delete_post("p1").await.expect("delete");
    delete.assert();
    assert_eq!(message, "Post deleted successfully");

    let detail_key = CacheKey::detail(ResourceKind::Posts, "p1");
    assert_eq!(
        admin.cache().lookup::<Post>(&detail_key),
        CacheLookup::NotFound
    );
    for params in [&first_page, &by_category] {
        let key = CacheKey::list(ResourceKind::Posts, params);
        assert!(admin.cache().is_stale(&key), "list {key} should be stale");
    }

    let reread = admin.queries.post("p1").await;
    assert_eq!(reread.error.as_deref(), Some("Post not found"));
    assert!(reread.data.is_none());
    assert_eq!(detail.calls(), 1);

    let toasts = admin.toasts().drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].text, "Post deleted successfully");
}

#[tokio::test]
async fn failed_create_leaves_cache_untouched() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method("GET").path("/api/tags");
        then.status(200)
            .json_body(json!({ "data": [tag_json(1, "rust")] }));
    });
    server.mock(|when, then| {
        when.method("POST").path("/api/tags");
        then.status(409)
            .json_body(json!({ "message": "Tag name already exists" }));
    });

    let admin = admin(&server);
    admin.queries.tags().await;

    let payload = validate_create_tag(CreateTagRequest {
        name: "rust".into(),
    })
    .expect("valid tag");
    let err = admin
        .mutations
        .create_tag(payload)
        .await
        .expect_err("duplicate");
    assert_eq!(err.server_message(), Some("Tag name already exists"));
    assert!(!admin.mutations.is_pending());

    let key = CacheKey::list(ResourceKind::Tags, &());
    assert!(!admin.cache().is_stale(&key));
    assert!(matches!(
        admin.cache().lookup::<Vec<Tag>>(&key),
        CacheLookup::Fresh(_)
    ));

    let toasts = admin.toasts().drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].text, "Tag name already exists");

    admin.queries.tags().await;
    assert_eq!(list.calls(), 1);
}

#[test]
fn late_response_does_not_overwrite_newer_one() {
    let cache = Arc::new(QueryCache::new(&CacheConfig::default()));
    let key = CacheKey::list(ResourceKind::Tags, &());

    let slow = cache.begin(&key);
    let fast = cache.begin(&key);
    assert!(fast.resolve(Ok(vec![tag(1, "renamed")].into_cached())));
    assert!(!slow.resolve(Ok(vec![tag(1, "original")].into_cached())));

    assert_eq!(
        cache.lookup::<Vec<Tag>>(&key),
        CacheLookup::Fresh(vec![tag(1, "renamed")])
    );
    assert_eq!(
        cache.snapshot::<Vec<Tag>>(&key).status,
        FetchStatus::Success
    );
}

#[tokio::test]
async fn category_rename_supersedes_embedded_snapshot() {
    let server = MockServer::start();
    let mut old_detail = server.mock(|when, then| {
        when.method("GET").path("/api/posts/p1");
        then.status(200).json_body(json!({ "data": post_json("p1", "News") }));
    });
    server.mock(|when, then| {
        when.method("PUT").path("/api/categories/1");
        then.status(200)
            .json_body(json!({ "data": category_json(1, "Updates") }));
    });

    let admin = admin(&server);
    let before = admin.queries.post("p1").await.data.expect("post");
    assert_eq!(before.category.map(|c| c.name).as_deref(), Some("News"));

    let payload = validate_update_category(UpdateCategoryRequest {
        name: "Updates".into(),
        description: "Project updates and news".into(),
    })
    .expect("valid category");
    admin
        .mutations
        .update_category(1, payload)
        .await
        .expect("update");

    let detail_key = CacheKey::detail(ResourceKind::Posts, "p1");
    assert!(admin.cache().is_stale(&detail_key));

    old_detail.delete();
    server.mock(|when, then| {
        when.method("GET").path("/api/posts/p1");
        then.status(200)
            .json_body(json!({ "data": post_json("p1", "Updates") }));
    });
    let after = admin.queries.post("p1").await.data.expect("post");
    assert_eq!(after.category.map(|c| c.name).as_deref(), Some("Updates"));
}

#[tokio::test]
async fn failed_read_settles_loading_flag() {
    let server = MockServer::start();
    let categories = server.mock(|when, then| {
        when.method("GET").path("/api/categories");
        then.status(500);
    });

    let admin = admin(&server);
    let result = admin.queries.categories().await;
    assert!(!result.is_loading);
    assert_eq!(
        result.error.as_deref(),
        Some("request failed with status 500")
    );

    let key = CacheKey::list(ResourceKind::Categories, &());
    let snapshot = admin
        .cache()
        .snapshot::<Vec<blogdesk_api_types::Category>>(&key);
    assert_eq!(snapshot.status, FetchStatus::Error);

    // Cache-first reads keep reporting the failure; refetch retries.
    admin.queries.categories().await;
    assert_eq!(categories.calls(), 1);
    admin.queries.refetch().categories().await;
    assert_eq!(categories.calls(), 2);
}
