use async_trait::async_trait;

use super::{ApiClient, ApiError, ResourceApi};
use crate::models::Workout;

/// Per-user workout listings
#[async_trait]
pub trait WorkoutsApi: ResourceApi<Workout> {
    /// `GET /workouts/user/:id`
    async fn by_user(&self, user_id: &str) -> Result<Vec<Workout>, ApiError>;

    /// `GET /workouts/my-workouts`, resolved from the bearer token
    async fn mine(&self) -> Result<Vec<Workout>, ApiError>;
}

#[async_trait]
impl WorkoutsApi for ApiClient {
    async fn by_user(&self, user_id: &str) -> Result<Vec<Workout>, ApiError> {
        self.get_list::<Workout, ()>(&["workouts", "user", user_id], None)
            .await
    }

    async fn mine(&self) -> Result<Vec<Workout>, ApiError> {
        self.get_list::<Workout, ()>(&["workouts", "my-workouts"], None)
            .await
    }
}
