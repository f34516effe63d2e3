use blogdesk_api_types::{CreateTagRequest, DataEnvelope, MessageEnvelope, Tag, UpdateTagRequest};
use reqwest::Method;

use super::client::HttpClient;
use super::error::ApiError;

pub struct TagsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> TagsApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> Result<Vec<Tag>, ApiError> {
        let res: DataEnvelope<Vec<Tag>> = self.http.get("tags", &[]).await?;
        Ok(res.data)
    }

    pub async fn get(&self, id: i64) -> Result<Tag, ApiError> {
        let path = format!("tags/{id}");
        let res: DataEnvelope<Tag> = self.http.get(&path, &[]).await?;
        Ok(res.data)
    }

    pub async fn create(&self, payload: &CreateTagRequest) -> Result<Tag, ApiError> {
        let res: DataEnvelope<Tag> = self.http.send(Method::POST, "tags", payload).await?;
        Ok(res.data)
    }

    pub async fn update(&self, id: i64, payload: &UpdateTagRequest) -> Result<Tag, ApiError> {
        let path = format!("tags/{id}");
        let res: DataEnvelope<Tag> = self.http.send(Method::PUT, &path, payload).await?;
        Ok(res.data)
    }

    pub async fn delete(&self, id: i64) -> Result<String, ApiError> {
        let path = format!("tags/{id}");
        let res: MessageEnvelope = self.http.delete(&path).await?;
        Ok(res.message)
    }
}
