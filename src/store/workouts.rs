use async_trait::async_trait;
use std::sync::Arc;

use super::{fallback, EntityStore, LocalFallbackStore, RemoteBackedStore, StoreBackend};
use crate::api::WorkoutsApi;
use crate::error::StoreError;
use crate::models::Workout;

/// Per-user listings layered on the generic workout backend
#[async_trait]
pub trait WorkoutBackend: StoreBackend<Workout> {
    async fn by_user(&self, user_id: &str) -> Result<Vec<Workout>, StoreError>;

    async fn mine(&self) -> Result<Vec<Workout>, StoreError>;
}

#[async_trait]
impl<A: ?Sized + WorkoutsApi> WorkoutBackend for RemoteBackedStore<A> {
    async fn by_user(&self, user_id: &str) -> Result<Vec<Workout>, StoreError> {
        self.api
            .by_user(user_id)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to fetch user workouts"))
    }

    async fn mine(&self) -> Result<Vec<Workout>, StoreError> {
        self.api
            .mine()
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to fetch your workouts"))
    }
}

#[async_trait]
impl WorkoutBackend for LocalFallbackStore<Workout> {
    async fn by_user(&self, user_id: &str) -> Result<Vec<Workout>, StoreError> {
        Ok(self
            .dataset
            .iter()
            .filter(|w| w.creator == user_id)
            .cloned()
            .collect())
    }

    async fn mine(&self) -> Result<Vec<Workout>, StoreError> {
        self.by_user(&self.current_user.user_id).await
    }
}

pub type WorkoutStore = EntityStore<Workout, dyn WorkoutBackend>;

impl EntityStore<Workout, dyn WorkoutBackend> {
    /// Remote only: a failed fetch empties the collection and reports the error
    pub fn new(api: Arc<dyn WorkoutsApi>) -> Self {
        Self::with_backends(Box::new(RemoteBackedStore::new(api)), None)
    }

    /// Same fallback behavior as the user and group stores
    pub fn with_offline_fallback(api: Arc<dyn WorkoutsApi>) -> Self {
        Self::with_backends(
            Box::new(RemoteBackedStore::new(api)),
            Some(Box::new(LocalFallbackStore::new(fallback::workouts()))),
        )
    }

    /// Replace the collection with workouts created by `user_id`
    pub async fn fetch_by_user(&mut self, user_id: &str) -> Result<(), StoreError> {
        self.begin();
        let result = self.backend().by_user(user_id).await;
        self.settle_listing(result)
    }

    /// Replace the collection with the signed-in user's workouts
    pub async fn fetch_mine(&mut self) -> Result<(), StoreError> {
        self.begin();
        let result = self.backend().mine().await;
        self.settle_listing(result)
    }

    fn settle_listing(&mut self, result: Result<Vec<Workout>, StoreError>) -> Result<(), StoreError> {
        let result = match result {
            Ok(workouts) => {
                self.state.items = workouts;
                Ok(())
            }
            Err(error) => {
                self.state.items.clear();
                Err(error)
            }
        };
        self.finish(result)
    }
}
