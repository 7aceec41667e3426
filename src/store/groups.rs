use async_trait::async_trait;
use std::sync::Arc;

use super::backend::failed;
use super::{fallback, EntityStore, LocalFallbackStore, RemoteBackedStore, StoreBackend, StoreState};
use crate::api::GroupsApi;
use crate::error::StoreError;
use crate::models::{Entity, Group, MemberInfo};

/// Membership operations layered on the generic group backend
#[async_trait]
pub trait GroupBackend: StoreBackend<Group> {
    async fn members(
        &self,
        state: &StoreState<Group>,
        group_id: &str,
    ) -> Result<Vec<MemberInfo>, StoreError>;

    async fn join(&self, state: &StoreState<Group>, group_name: &str) -> Result<Group, StoreError>;

    async fn leave(&self, state: &StoreState<Group>, group_id: &str) -> Result<Group, StoreError>;

    async fn remove_member(
        &self,
        state: &StoreState<Group>,
        group_id: &str,
        user_id: &str,
    ) -> Result<(), StoreError>;

    async fn search(&self, term: &str) -> Result<Vec<Group>, StoreError>;

    async fn member_of(&self, user_id: &str) -> Result<Vec<Group>, StoreError>;
}

#[async_trait]
impl<A: ?Sized + GroupsApi> GroupBackend for RemoteBackedStore<A> {
    async fn members(
        &self,
        _state: &StoreState<Group>,
        group_id: &str,
    ) -> Result<Vec<MemberInfo>, StoreError> {
        self.api
            .members(group_id)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to fetch group members"))
    }

    async fn join(&self, _state: &StoreState<Group>, group_name: &str) -> Result<Group, StoreError> {
        self.api
            .join(group_name)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to join group"))
    }

    async fn leave(&self, _state: &StoreState<Group>, group_id: &str) -> Result<Group, StoreError> {
        self.api
            .leave(group_id)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to leave group"))
    }

    async fn remove_member(
        &self,
        _state: &StoreState<Group>,
        group_id: &str,
        user_id: &str,
    ) -> Result<(), StoreError> {
        self.api
            .remove_member(group_id, user_id)
            .await
            .map_err(|e| StoreError::from_api(e, "Failed to remove member"))
    }

    async fn search(&self, term: &str) -> Result<Vec<Group>, StoreError> {
        self.api
            .search(term)
            .await
            .map_err(|e| StoreError::from_api(e, &failed("search", Group::PLURAL)))
    }

    async fn member_of(&self, user_id: &str) -> Result<Vec<Group>, StoreError> {
        self.api
            .member_of(user_id)
            .await
            .map_err(|e| StoreError::from_api(e, &failed("fetch", "user groups")))
    }
}

impl LocalFallbackStore<Group> {
    fn held(&self, state: &StoreState<Group>, group_id: &str) -> Result<Group, StoreError> {
        state.lookup(group_id).cloned().ok_or_else(|| self.not_found())
    }
}

#[async_trait]
impl GroupBackend for LocalFallbackStore<Group> {
    async fn members(
        &self,
        state: &StoreState<Group>,
        group_id: &str,
    ) -> Result<Vec<MemberInfo>, StoreError> {
        Ok(self.held(state, group_id)?.members)
    }

    /// Adds the placeholder user; joining twice changes nothing
    async fn join(&self, state: &StoreState<Group>, group_name: &str) -> Result<Group, StoreError> {
        let mut group = state
            .items
            .iter()
            .find(|g| g.name == group_name)
            .cloned()
            .ok_or_else(|| self.not_found())?;

        if !group.members.iter().any(|m| m.user_id == self.current_user.user_id) {
            group.members.push(self.current_user.clone());
        }
        Ok(group)
    }

    async fn leave(&self, state: &StoreState<Group>, group_id: &str) -> Result<Group, StoreError> {
        let mut group = self.held(state, group_id)?;
        if group.is_organizer(&self.current_user.user_id) {
            return Err(StoreError::validation("The organizer cannot leave the group"));
        }
        group.members.retain(|m| m.user_id != self.current_user.user_id);
        Ok(group)
    }

    async fn remove_member(
        &self,
        state: &StoreState<Group>,
        group_id: &str,
        _user_id: &str,
    ) -> Result<(), StoreError> {
        self.held(state, group_id).map(|_| ())
    }

    async fn search(&self, term: &str) -> Result<Vec<Group>, StoreError> {
        Ok(self
            .dataset
            .iter()
            .filter(|g| g.matches_term(term))
            .cloned()
            .collect())
    }

    async fn member_of(&self, user_id: &str) -> Result<Vec<Group>, StoreError> {
        Ok(self
            .dataset
            .iter()
            .filter(|g| g.is_member(user_id))
            .cloned()
            .collect())
    }
}

pub type GroupStore = EntityStore<Group, dyn GroupBackend>;

impl EntityStore<Group, dyn GroupBackend> {
    pub fn new(api: Arc<dyn GroupsApi>) -> Self {
        Self::with_backends(
            Box::new(RemoteBackedStore::new(api)),
            Some(Box::new(LocalFallbackStore::new(fallback::groups()))),
        )
    }

    /// Members of a group; does not touch the collection
    pub async fn members(&mut self, group_id: &str) -> Result<Vec<MemberInfo>, StoreError> {
        self.begin();
        let result = self.backend().members(&self.state, group_id).await;
        self.finish(result)
    }

    /// Join by group name, the way the server addresses it
    pub async fn join(&mut self, group_name: &str) -> Result<Group, StoreError> {
        self.begin();
        let result = self.backend().join(&self.state, group_name).await;
        if let Ok(ref group) = result {
            self.store_membership(group, Some(group_name));
        }
        self.finish(result)
    }

    pub async fn leave(&mut self, group_id: &str) -> Result<Group, StoreError> {
        self.begin();
        let result = self.backend().leave(&self.state, group_id).await;
        if let Ok(ref group) = result {
            self.store_membership(group, None);
        }
        self.finish(result)
    }

    /// The organizer is never removable; checked before the removal is sent.
    /// A group the store does not hold is looked up first.
    pub async fn remove_member(&mut self, group_id: &str, user_id: &str) -> Result<(), StoreError> {
        self.begin();

        let group = match self.state.lookup(group_id) {
            Some(group) => Ok(group.clone()),
            None => self.backend().fetch_by_id(group_id).await,
        };

        let result = match group {
            Ok(group) if group.is_organizer(user_id) => Err(StoreError::validation(
                "The organizer cannot be removed from the group",
            )),
            Ok(_) => {
                self.backend()
                    .remove_member(&self.state, group_id, user_id)
                    .await
            }
            Err(error) => Err(error),
        };
        if result.is_ok() {
            self.splice_member(group_id, user_id);
        }
        self.finish(result)
    }

    /// Replace the collection with groups matching `term`
    pub async fn search(&mut self, term: &str) -> Result<(), StoreError> {
        self.begin();
        let result = self.backend().search(term).await;
        let result = result.map(|groups| self.state.items = groups);
        self.finish(result)
    }

    /// Replace the collection with the groups `user_id` belongs to
    pub async fn fetch_member_of(&mut self, user_id: &str) -> Result<(), StoreError> {
        self.begin();
        let result = self.backend().member_of(user_id).await;
        let result = result.map(|groups| self.state.items = groups);
        self.finish(result)
    }

    fn store_membership(&mut self, group: &Group, by_name: Option<&str>) {
        let targets = self
            .state
            .items
            .iter_mut()
            .chain(self.state.selected.iter_mut())
            .filter(|g| g.id == group.id || by_name.map(|n| g.name == n).unwrap_or(false));
        for target in targets {
            *target = group.clone();
        }
    }

    fn splice_member(&mut self, group_id: &str, user_id: &str) {
        let groups = self
            .state
            .items
            .iter_mut()
            .chain(self.state.selected.iter_mut())
            .filter(|g| g.id == group_id);
        for group in groups {
            group.members.retain(|m| m.user_id != user_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::GroupQuery;

    fn offline_state() -> StoreState<Group> {
        StoreState {
            items: fallback::groups(),
            is_offline: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_local_join_is_idempotent() {
        let local = LocalFallbackStore::new(fallback::groups());
        let mut state = offline_state();

        let group = local.join(&state, "Yoga Enthusiasts").await.unwrap();
        assert_eq!(group.members.len(), 2);

        state.items[2] = local.join(&state, "Weekend Warriors").await.unwrap();
        assert_eq!(state.items[2].members.len(), 3);

        let again = local.join(&state, "Weekend Warriors").await.unwrap();
        assert_eq!(again.members.len(), 3);
    }

    #[tokio::test]
    async fn test_local_join_unknown_name() {
        let local = LocalFallbackStore::new(fallback::groups());
        let error = local.join(&offline_state(), "Chess Club").await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_local_leave_rejects_organizer() {
        let local = LocalFallbackStore::new(fallback::groups());
        let error = local.leave(&offline_state(), "1").await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Validation);

        let group = local.leave(&offline_state(), "2").await.unwrap();
        assert!(group.members.iter().all(|m| m.user_id != "1"));
    }

    #[tokio::test]
    async fn test_local_search_and_member_of() {
        let local = LocalFallbackStore::new(fallback::groups());

        let found = local.search("yoga").await.unwrap();
        assert_eq!(found.len(), 1);

        let mine = local.member_of("1").await.unwrap();
        let names: Vec<_> = mine.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Morning HIIT", "Yoga Enthusiasts", "Running Club"]);
    }

    #[test]
    fn test_splice_member_touches_selection() {
        let mut store = GroupStore::with_backends(
            Box::new(LocalFallbackStore::new(fallback::groups())),
            None,
        );
        store.state.items = fallback::groups();
        store.state.selected = store.state.items.first().cloned();

        store.splice_member("1", "2");

        assert_eq!(store.items()[0].members.len(), 1);
        assert_eq!(store.selected().map(|g| g.members.len()), Some(1));
        assert_eq!(store.items()[1].members.len(), 2);
    }

    #[tokio::test]
    async fn test_remove_organizer_is_rejected_locally() {
        let mut store = GroupStore::with_backends(
            Box::new(LocalFallbackStore::new(fallback::groups())),
            None,
        );
        store.fetch_all(&GroupQuery::default()).await.unwrap();

        let error = store.remove_member("4", "5").await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::Validation);
        assert_eq!(store.items()[3].members.len(), 2);
    }
}
