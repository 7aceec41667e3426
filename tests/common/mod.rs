#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use fitness_admin::api::{ApiError, GroupsApi, ResourceApi, WorkoutsApi};
use fitness_admin::models::{Entity, Group, MemberInfo, Workout};

/// In-memory API double that records how often it was called
pub struct FakeApi<E> {
    items: Mutex<Vec<E>>,
    failure: Mutex<Option<ApiError>>,
    calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl<E: Entity> FakeApi<E> {
    pub fn with_items(items: Vec<E>) -> Arc<Self> {
        Arc::new(Self {
            items: Mutex::new(items),
            failure: Mutex::new(None),
            calls: AtomicUsize::new(0),
            next_id: AtomicUsize::new(100),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        let api = Self::with_items(Vec::new());
        api.fail_with(ApiError::Network("connection refused".to_string()));
        api
    }

    pub fn fail_with(&self, error: ApiError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn recover(&self, items: Vec<E>) {
        *self.failure.lock().unwrap() = None;
        *self.items.lock().unwrap() = items;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn items(&self) -> Vec<E> {
        self.items.lock().unwrap().clone()
    }

    /// Count the call and short-circuit with the configured failure
    fn enter(&self) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn missing() -> ApiError {
        ApiError::NotFound(format!("{} not found", E::title()))
    }
}

#[async_trait]
impl<E> ResourceApi<E> for FakeApi<E>
where
    E: Entity,
    E::Draft: Clone,
{
    async fn list(&self, _query: &E::Query) -> Result<Vec<E>, ApiError> {
        self.enter()?;
        Ok(self.items())
    }

    async fn get(&self, id: &str) -> Result<E, ApiError> {
        self.enter()?;
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id() == id)
            .cloned()
            .ok_or_else(Self::missing)
    }

    async fn create(&self, draft: &E::Draft) -> Result<E, ApiError> {
        self.enter()?;
        let id = format!("srv-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let entity = E::synthesize(draft.clone(), id, Utc::now(), &MemberInfo::new("9", "Server Admin"));
        self.items.lock().unwrap().push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, id: &str, patch: &E::Patch) -> Result<E, ApiError> {
        self.enter()?;
        let mut items = self.items.lock().unwrap();
        let entity = items.iter_mut().find(|e| e.id() == id).ok_or_else(Self::missing)?;
        entity.apply_patch(patch);
        Ok(entity.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.enter()?;
        let mut items = self.items.lock().unwrap();
        let index = items.iter().position(|e| e.id() == id).ok_or_else(Self::missing)?;
        items.remove(index);
        Ok(())
    }
}

#[async_trait]
impl GroupsApi for FakeApi<Group> {
    async fn members(&self, group_id: &str) -> Result<Vec<MemberInfo>, ApiError> {
        self.enter()?;
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == group_id)
            .map(|g| g.members.clone())
            .ok_or_else(Self::missing)
    }

    async fn join(&self, group_name: &str) -> Result<Group, ApiError> {
        self.enter()?;
        let mut items = self.items.lock().unwrap();
        let group = items
            .iter_mut()
            .find(|g| g.name == group_name)
            .ok_or_else(Self::missing)?;
        if !group.is_member("9") {
            group.members.push(MemberInfo::new("9", "Server Admin"));
        }
        Ok(group.clone())
    }

    async fn leave(&self, group_id: &str) -> Result<Group, ApiError> {
        self.enter()?;
        let mut items = self.items.lock().unwrap();
        let group = items
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(Self::missing)?;
        group.members.retain(|m| m.user_id != "9");
        Ok(group.clone())
    }

    async fn remove_member(&self, group_id: &str, user_id: &str) -> Result<(), ApiError> {
        self.enter()?;
        let mut items = self.items.lock().unwrap();
        let group = items
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(Self::missing)?;
        group.members.retain(|m| m.user_id != user_id);
        Ok(())
    }

    async fn search(&self, term: &str) -> Result<Vec<Group>, ApiError> {
        self.enter()?;
        Ok(self.items().into_iter().filter(|g| g.matches_term(term)).collect())
    }

    async fn member_of(&self, user_id: &str) -> Result<Vec<Group>, ApiError> {
        self.enter()?;
        Ok(self.items().into_iter().filter(|g| g.is_member(user_id)).collect())
    }
}

#[async_trait]
impl WorkoutsApi for FakeApi<Workout> {
    async fn by_user(&self, user_id: &str) -> Result<Vec<Workout>, ApiError> {
        self.enter()?;
        Ok(self.items().into_iter().filter(|w| w.creator == user_id).collect())
    }

    async fn mine(&self) -> Result<Vec<Workout>, ApiError> {
        self.by_user("9").await
    }
}
