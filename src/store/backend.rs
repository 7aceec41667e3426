use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use super::StoreState;
use crate::api::ResourceApi;
use crate::error::StoreError;
use crate::models::{Entity, MemberInfo};

/// Which data path a backend serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Remote,
    Local,
}

/// How an update lands in the store's state
#[derive(Debug)]
pub enum Updated<E: Entity> {
    /// The server's representation replaces local copies
    Replaced(E),
    /// The patch is overlaid onto local copies
    Merged(E::Patch),
}

/// Data path behind an entity store
#[async_trait]
pub trait StoreBackend<E: Entity>: Send + Sync {
    fn mode(&self) -> Mode;

    async fn fetch_all(&self, query: &E::Query) -> Result<Vec<E>, StoreError>;

    async fn fetch_by_id(&self, id: &str) -> Result<E, StoreError>;

    async fn create(&self, draft: E::Draft) -> Result<E, StoreError>;

    async fn update(
        &self,
        state: &StoreState<E>,
        id: &str,
        patch: E::Patch,
    ) -> Result<Updated<E>, StoreError>;

    async fn delete(&self, state: &StoreState<E>, id: &str) -> Result<(), StoreError>;
}

/// Every operation is a request against the API
pub struct RemoteBackedStore<A: ?Sized> {
    pub(crate) api: Arc<A>,
}

impl<A: ?Sized> RemoteBackedStore<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

/// Generic message for a failed call, e.g. "Failed to delete group"
pub(crate) fn failed(action: &str, noun: &str) -> String {
    format!("Failed to {} {}", action, noun)
}

#[async_trait]
impl<E, A> StoreBackend<E> for RemoteBackedStore<A>
where
    E: Entity,
    A: ?Sized + ResourceApi<E>,
{
    fn mode(&self) -> Mode {
        Mode::Remote
    }

    async fn fetch_all(&self, query: &E::Query) -> Result<Vec<E>, StoreError> {
        self.api
            .list(query)
            .await
            .map_err(|e| StoreError::from_api(e, &failed("fetch", E::PLURAL)))
    }

    async fn fetch_by_id(&self, id: &str) -> Result<E, StoreError> {
        self.api
            .get(id)
            .await
            .map_err(|e| StoreError::from_api(e, &failed("fetch", E::SINGULAR)))
    }

    async fn create(&self, draft: E::Draft) -> Result<E, StoreError> {
        self.api
            .create(&draft)
            .await
            .map_err(|e| StoreError::from_api(e, &failed("create", E::SINGULAR)))
    }

    async fn update(
        &self,
        _state: &StoreState<E>,
        id: &str,
        patch: E::Patch,
    ) -> Result<Updated<E>, StoreError> {
        self.api
            .update(id, &patch)
            .await
            .map(Updated::Replaced)
            .map_err(|e| StoreError::from_api(e, &failed("update", E::SINGULAR)))
    }

    async fn delete(&self, _state: &StoreState<E>, id: &str) -> Result<(), StoreError> {
        self.api
            .delete(id)
            .await
            .map_err(|e| StoreError::from_api(e, &failed("delete", E::SINGULAR)))
    }
}

/// Serves a fixed sample dataset and mutates only the in-memory collection
pub struct LocalFallbackStore<E> {
    pub(crate) dataset: Vec<E>,
    pub(crate) current_user: MemberInfo,
    last_id: AtomicI64,
}

impl<E: Entity> LocalFallbackStore<E> {
    pub fn new(dataset: Vec<E>) -> Self {
        Self {
            dataset,
            current_user: MemberInfo::placeholder(),
            last_id: AtomicI64::new(0),
        }
    }

    /// `mock-<millis>`, strictly increasing so rapid creates never collide
    pub(crate) fn next_id(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let previous = match self
            .last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
        {
            Ok(previous) | Err(previous) => previous,
        };
        format!("mock-{}", now.max(previous + 1))
    }

    pub(crate) fn not_found(&self) -> StoreError {
        StoreError::not_found(format!("{} not found in offline mode", E::title()))
    }
}

#[async_trait]
impl<E: Entity> StoreBackend<E> for LocalFallbackStore<E> {
    fn mode(&self) -> Mode {
        Mode::Local
    }

    async fn fetch_all(&self, _query: &E::Query) -> Result<Vec<E>, StoreError> {
        Ok(self.dataset.clone())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<E, StoreError> {
        self.dataset
            .iter()
            .find(|e| e.id() == id)
            .cloned()
            .ok_or_else(|| self.not_found())
    }

    async fn create(&self, draft: E::Draft) -> Result<E, StoreError> {
        Ok(E::synthesize(draft, self.next_id(), Utc::now(), &self.current_user))
    }

    async fn update(
        &self,
        state: &StoreState<E>,
        id: &str,
        patch: E::Patch,
    ) -> Result<Updated<E>, StoreError> {
        if !state.contains(id) {
            return Err(self.not_found());
        }
        Ok(Updated::Merged(patch))
    }

    async fn delete(&self, state: &StoreState<E>, id: &str) -> Result<(), StoreError> {
        if state.find(id).is_none() {
            return Err(self.not_found());
        }
        Ok(())
    }
}
