use std::sync::Arc;

use super::{fallback, EntityStore, LocalFallbackStore, RemoteBackedStore};
use crate::api::ResourceApi;
use crate::error::StoreError;
use crate::models::{Role, User, UserPatch};

pub type UserStore = EntityStore<User>;

impl EntityStore<User> {
    pub fn new(api: Arc<dyn ResourceApi<User>>) -> Self {
        Self::with_backends(
            Box::new(RemoteBackedStore::new(api)),
            Some(Box::new(LocalFallbackStore::new(fallback::users()))),
        )
    }

    /// Role changes are plain partial updates carrying only `role`
    pub async fn change_role(&mut self, id: &str, role: Role) -> Result<User, StoreError> {
        self.update(id, UserPatch::role(role)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountStatus, UserQuery};

    fn offline_store() -> UserStore {
        UserStore::with_backends(Box::new(LocalFallbackStore::new(fallback::users())), None)
    }

    #[tokio::test]
    async fn test_change_role_updates_collection() {
        let mut store = offline_store();
        store.fetch_all(&UserQuery::default()).await.unwrap();

        let user = store.change_role("3", Role::Trainer).await.unwrap();

        assert_eq!(user.role, Role::Trainer);
        assert_eq!(store.items()[2].role, Role::Trainer);
        assert_eq!(store.items()[2].account_status, Some(AccountStatus::Inactive));
        assert_eq!(store.items()[0].role, Role::Admin);
    }
}
