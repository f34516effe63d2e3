use blogdesk_api_types::{
    Category, CreateCategoryRequest, DataEnvelope, MessageEnvelope, UpdateCategoryRequest,
};
use reqwest::Method;

use super::client::HttpClient;
use super::error::ApiError;

pub struct CategoriesApi<'a> {
    http: &'a HttpClient,
}

impl<'a> CategoriesApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> Result<Vec<Category>, ApiError> {
        let res: DataEnvelope<Vec<Category>> = self.http.get("categories", &[]).await?;
        Ok(res.data)
    }

    pub async fn get(&self, id: i64) -> Result<Category, ApiError> {
        let path = format!("categories/{id}");
        let res: DataEnvelope<Category> = self.http.get(&path, &[]).await?;
        Ok(res.data)
    }

    pub async fn create(&self, payload: &CreateCategoryRequest) -> Result<Category, ApiError> {
        let res: DataEnvelope<Category> =
            self.http.send(Method::POST, "categories", payload).await?;
        Ok(res.data)
    }

    pub async fn update(
        &self,
        id: i64,
        payload: &UpdateCategoryRequest,
    ) -> Result<Category, ApiError> {
        let path = format!("categories/{id}");
        let res: DataEnvelope<Category> = self.http.send(Method::PUT, &path, payload).await?;
        Ok(res.data)
    }

    pub async fn delete(&self, id: i64) -> Result<String, ApiError> {
        let path = format!("categories/{id}");
        let res: MessageEnvelope = self.http.delete(&path).await?;
        Ok(res.message)
    }
}
