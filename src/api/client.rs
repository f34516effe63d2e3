use std::time::Duration;

use reqwest::{Client, Method, Response, Url};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use super::categories::CategoriesApi;
use super::error::ApiError;
use super::posts::PostsApi;
use super::tags::TagsApi;
use crate::config::ApiSettings;

/// JSON transport bound to the API base URL.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    base: Url,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Self::with_user_agent(base_url, timeout, Self::user_agent())
    }

    pub(crate) fn with_user_agent(
        base_url: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)?;
        // `Url::join` replaces the last segment unless the path ends with `/`.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self { client, base })
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self, ApiError> {
        Self::new(settings.base_url.as_str(), settings.timeout)
    }

    pub fn user_agent() -> &'static str {
        concat!("blogdesk/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn posts(&self) -> PostsApi<'_> {
        PostsApi::new(self)
    }

    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi::new(self)
    }

    pub fn tags(&self) -> TagsApi<'_> {
        TagsApi::new(self)
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(ApiError::Url)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, path, query, None).await
    }

    pub(crate) async fn send<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(method, path, &[], Some(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::DELETE, path, &[], None).await
    }

    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let mut url = self.url(path)?;
        if !query.is_empty() {
            let mut qp = url.query_pairs_mut();
            for (k, v) in query {
                qp.append_pair(k, v);
            }
        }

        debug!(method = %method, url = %url, "api request");

        let mut req = self.client.request(method, url);
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        Self::handle(resp).await
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::from_status(status, &bytes));
        }
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
