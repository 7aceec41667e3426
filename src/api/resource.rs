use async_trait::async_trait;
use reqwest::Method;

use super::{ApiClient, ApiError};
use crate::models::Entity;

/// CRUD calls shared by every resource collection
#[async_trait]
pub trait ResourceApi<E: Entity>: Send + Sync {
    /// `GET /<resource>?<query>`
    async fn list(&self, query: &E::Query) -> Result<Vec<E>, ApiError>;

    /// `GET /<resource>/:id`
    async fn get(&self, id: &str) -> Result<E, ApiError>;

    /// `POST /<resource>`
    async fn create(&self, draft: &E::Draft) -> Result<E, ApiError>;

    /// `PATCH /<resource>/:id`
    async fn update(&self, id: &str, patch: &E::Patch) -> Result<E, ApiError>;

    /// `DELETE /<resource>/:id`
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl<E: Entity> ResourceApi<E> for ApiClient {
    async fn list(&self, query: &E::Query) -> Result<Vec<E>, ApiError> {
        self.get_list(&[E::PATH], Some(query)).await
    }

    async fn get(&self, id: &str) -> Result<E, ApiError> {
        self.get_json::<E, ()>(&[E::PATH, id], None).await
    }

    async fn create(&self, draft: &E::Draft) -> Result<E, ApiError> {
        self.send_json(Method::POST, &[E::PATH], draft).await
    }

    async fn update(&self, id: &str, patch: &E::Patch) -> Result<E, ApiError> {
        self.send_json(Method::PATCH, &[E::PATH, id], patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &[E::PATH, id]).await
    }
}
