use std::time::Duration;

use blogdesk::api::{ApiError, HttpClient, PostListParams};
use blogdesk_api_types::{CreatePostRequest, UpdateCategoryRequest, UpdatePostRequest};
use httpmock::MockServer;
use serde_json::json;

const STAMP: &str = "2026-03-01T12:00:00Z";

fn client(server: &MockServer) -> HttpClient {
    HttpClient::new(&format!("{}/api", server.base_url()), Duration::from_secs(5))
        .expect("client should build")
}

fn category_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": "desc",
        "createdAt": STAMP,
        "updatedAt": STAMP,
        "postCount": 2
    })
}

fn post_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "slug": "slug",
        "content": "<p>body</p>",
        "excerpt": "excerpt",
        "categoryId": 1,
        "readTime": 3,
        "createdAt": STAMP,
        "updatedAt": STAMP,
        "category": category_json(1, "News"),
        "tags": []
    })
}

#[tokio::test]
async fn list_posts_sends_only_present_filters() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/api/posts")
            .query_param("page", "1")
            .query_param("limit", "5")
            .query_param("categoryId", "4")
            .query_param("year", "2026");
        then.status(200).json_body(json!({
            "data": [post_json("p1", "First post")],
            "pagination": {
                "page": 1, "limit": 5, "total": 1, "totalPages": 1,
                "hasNext": false, "hasPrev": false
            }
        }));
    });

    let params = PostListParams {
        page: Some(1),
        limit: Some(5),
        search: Some("  ".into()),
        category_id: Some(4),
        year: Some(2026),
        ..Default::default()
    };
    let page = client(&server)
        .posts()
        .list(&params)
        .await
        .expect("list should succeed");

    mock.assert();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.pagination.total, 1);
    assert_eq!(
        page.data[0].category.as_ref().map(|c| c.name.as_str()),
        Some("News")
    );
}

#[tokio::test]
async fn get_post_unwraps_data_envelope() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/posts/abc");
        then.status(200).json_body(json!({ "data": post_json("abc", "Hello") }));
    });

    let post = client(&server).posts().get("abc").await.expect("get");
    assert_eq!(post.id, "abc");
    assert_eq!(post.read_time, 3);
}

#[tokio::test]
async fn create_post_sends_camel_case_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST").path("/api/posts").json_body(json!({
            "title": "A new post",
            "content": "<p>body</p>",
            "excerpt": "excerpt",
            "categoryId": 1,
            "tags": [1, 2]
        }));
        then.status(201).json_body(json!({ "data": post_json("p9", "A new post") }));
    });

    let request = CreatePostRequest {
        title: "A new post".into(),
        content: "<p>body</p>".into(),
        excerpt: "excerpt".into(),
        category_id: 1,
        tags: vec![1, 2],
    };
    let post = client(&server).posts().create(&request).await.expect("create");
    mock.assert();
    assert_eq!(post.id, "p9");
}

#[tokio::test]
async fn partial_update_omits_absent_fields() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("PUT")
            .path("/api/posts/p1")
            .json_body(json!({ "title": "Renamed post" }));
        then.status(200).json_body(json!({ "data": post_json("p1", "Renamed post") }));
    });

    let request = UpdatePostRequest {
        title: Some("Renamed post".into()),
        ..Default::default()
    };
    let post = client(&server)
        .posts()
        .update("p1", &request)
        .await
        .expect("update");
    mock.assert();
    assert_eq!(post.title, "Renamed post");
}

#[tokio::test]
async fn update_category_replaces_fields() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("PUT").path("/api/categories/1");
        then.status(200).json_body(json!({ "data": category_json(1, "Updates") }));
    });

    let request = UpdateCategoryRequest {
        name: "Updates".into(),
        description: "desc".into(),
    };
    let category = client(&server)
        .categories()
        .update(1, &request)
        .await
        .expect("update");
    assert_eq!(category.name, "Updates");
    assert_eq!(category.post_count, 2);
}

#[tokio::test]
async fn delete_returns_confirmation_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("DELETE").path("/api/tags/3");
        then.status(200)
            .json_body(json!({ "message": "Tag deleted successfully" }));
    });

    let message = client(&server).tags().delete(3).await.expect("delete");
    assert_eq!(message, "Tag deleted successfully");
}

#[tokio::test]
async fn repeated_delete_surfaces_server_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("DELETE").path("/api/tags/3");
        then.status(404).json_body(json!({ "message": "Tag not found" }));
    });

    let err = client(&server).tags().delete(3).await.expect_err("gone");
    assert!(err.is_not_found());
    assert_eq!(err.server_message(), Some("Tag not found"));
    assert_eq!(err.to_string(), "Tag not found");
}

#[tokio::test]
async fn server_error_without_body_uses_generic_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/categories");
        then.status(503);
    });

    let err = client(&server).categories().list().await.expect_err("down");
    assert!(matches!(err, ApiError::Server { status: 503, message: None }));
    assert_eq!(err.to_string(), "request failed with status 503");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/tags");
        then.status(200).body("not json");
    });

    let err = client(&server).tags().list().await.expect_err("garbage");
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let client = HttpClient::new("http://127.0.0.1:9/api", Duration::from_millis(500))
        .expect("client should build");
    let err = client.tags().list().await.expect_err("nothing listens on port 9");
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.server_message(), None);
}
