use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use super::{ApiClient, ApiError, ResourceApi};
use crate::models::{Group, MemberInfo};

/// Membership and lookup endpoints specific to groups
#[async_trait]
pub trait GroupsApi: ResourceApi<Group> {
    /// `GET /groups/:id/members`
    async fn members(&self, group_id: &str) -> Result<Vec<MemberInfo>, ApiError>;

    /// `POST /groups/:name/join`; the server addresses groups by name here
    async fn join(&self, group_name: &str) -> Result<Group, ApiError>;

    /// `POST /groups/:id/leave`
    async fn leave(&self, group_id: &str) -> Result<Group, ApiError>;

    /// `DELETE /groups/:id/members/:userId`
    async fn remove_member(&self, group_id: &str, user_id: &str) -> Result<(), ApiError>;

    /// `GET /groups/search?name=`
    async fn search(&self, term: &str) -> Result<Vec<Group>, ApiError>;

    /// `GET /groups/member/:userId`
    async fn member_of(&self, user_id: &str) -> Result<Vec<Group>, ApiError>;
}

#[async_trait]
impl GroupsApi for ApiClient {
    async fn members(&self, group_id: &str) -> Result<Vec<MemberInfo>, ApiError> {
        self.get_list::<MemberInfo, ()>(&["groups", group_id, "members"], None)
            .await
    }

    async fn join(&self, group_name: &str) -> Result<Group, ApiError> {
        self.send_json(Method::POST, &["groups", group_name, "join"], &json!({}))
            .await
    }

    async fn leave(&self, group_id: &str) -> Result<Group, ApiError> {
        self.send_json(Method::POST, &["groups", group_id, "leave"], &json!({}))
            .await
    }

    async fn remove_member(&self, group_id: &str, user_id: &str) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &["groups", group_id, "members", user_id])
            .await
    }

    async fn search(&self, term: &str) -> Result<Vec<Group>, ApiError> {
        self.get_list(&["groups", "search"], Some(&[("name", term)]))
            .await
    }

    async fn member_of(&self, user_id: &str) -> Result<Vec<Group>, ApiError> {
        self.get_list::<Group, ()>(&["groups", "member", user_id], None)
            .await
    }
}
