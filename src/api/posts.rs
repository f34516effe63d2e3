use blogdesk_api_types::{
    CreatePostRequest, DataEnvelope, MessageEnvelope, Post, PostListResponse, UpdatePostRequest,
};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::HttpClient;
use super::error::ApiError;

/// Query parameters accepted by `GET /posts`. Absent values are never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl PostListParams {
    /// Collapse blank search text to absent so equivalent filters compare equal.
    pub fn normalized(&self) -> Self {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string);
        Self {
            search,
            ..self.clone()
        }
    }

    /// Outgoing query pairs in a fixed order.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let params = self.normalized();
        let mut q = Vec::new();
        if let Some(p) = params.page {
            q.push(("page", p.to_string()));
        }
        if let Some(l) = params.limit {
            q.push(("limit", l.to_string()));
        }
        if let Some(s) = params.search {
            q.push(("search", s));
        }
        if let Some(c) = params.category_id {
            q.push(("categoryId", c.to_string()));
        }
        if let Some(t) = params.tag_id {
            q.push(("tagId", t.to_string()));
        }
        if let Some(m) = params.month {
            q.push(("month", m.to_string()));
        }
        if let Some(y) = params.year {
            q.push(("year", y.to_string()));
        }
        q
    }
}

pub struct PostsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> PostsApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, params: &PostListParams) -> Result<PostListResponse, ApiError> {
        self.http.get("posts", &params.to_query()).await
    }

    pub async fn get(&self, id: &str) -> Result<Post, ApiError> {
        let path = format!("posts/{id}");
        let res: DataEnvelope<Post> = self.http.get(&path, &[]).await?;
        Ok(res.data)
    }

    pub async fn create(&self, payload: &CreatePostRequest) -> Result<Post, ApiError> {
        let res: DataEnvelope<Post> = self.http.send(Method::POST, "posts", payload).await?;
        Ok(res.data)
    }

    pub async fn update(&self, id: &str, payload: &UpdatePostRequest) -> Result<Post, ApiError> {
        let path = format!("posts/{id}");
        let res: DataEnvelope<Post> = self.http.send(Method::PUT, &path, payload).await?;
        Ok(res.data)
    }

    pub async fn delete(&self, id: &str) -> Result<String, ApiError> {
        let path = format!("posts/{id}");
        let res: MessageEnvelope = self.http.delete(&path).await?;
        Ok(res.message)
    }
}
