// Client-side entity stores with offline fallback

pub mod backend;
pub mod fallback;
pub mod groups;
mod state;
pub mod users;
pub mod workouts;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::models::Entity;

pub use backend::{LocalFallbackStore, Mode, RemoteBackedStore, StoreBackend, Updated};
pub use groups::{GroupBackend, GroupStore};
pub use state::StoreState;
pub use users::UserStore;
pub use workouts::{WorkoutBackend, WorkoutStore};

/// Shown after a connectivity failure switches a store onto sample data
pub const OFFLINE_ADVISORY: &str =
    "Network error: Using offline mode with sample data. Please check your API connection.";

/// Mirror of one server collection.
///
/// Requests go through `remote` until a fetch fails for connectivity
/// reasons; from then on every operation other than `fetch_all` is served by
/// `local`. A later successful `fetch_all` switches the store back online.
/// Stores built without a local backend never go offline.
pub struct EntityStore<E, B = dyn StoreBackend<E>>
where
    E: Entity,
    B: ?Sized + StoreBackend<E>,
{
    remote: Box<B>,
    local: Option<Box<B>>,
    state: StoreState<E>,
    publisher: watch::Sender<StoreState<E>>,
}

impl<E, B> EntityStore<E, B>
where
    E: Entity,
    B: ?Sized + StoreBackend<E>,
{
    pub fn with_backends(remote: Box<B>, local: Option<Box<B>>) -> Self {
        let (publisher, _) = watch::channel(StoreState::default());
        Self {
            remote,
            local,
            state: StoreState::default(),
            publisher,
        }
    }

    pub fn state(&self) -> &StoreState<E> {
        &self.state
    }

    pub fn items(&self) -> &[E] {
        &self.state.items
    }

    pub fn selected(&self) -> Option<&E> {
        self.state.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn is_offline(&self) -> bool {
        self.state.is_offline
    }

    pub fn error(&self) -> Option<&StoreError> {
        self.state.error.as_ref()
    }

    pub fn supports_offline(&self) -> bool {
        self.local.is_some()
    }

    /// Data path serving everything except `fetch_all`
    pub fn mode(&self) -> Mode {
        self.backend().mode()
    }

    /// Receives a snapshot after every state transition
    pub fn subscribe(&self) -> watch::Receiver<StoreState<E>> {
        self.publisher.subscribe()
    }

    pub fn set_selected(&mut self, entity: Option<E>) {
        self.state.selected = entity;
        self.publish();
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
        self.publish();
    }

    /// Load the collection. Always contacts the server, even when offline.
    pub async fn fetch_all(&mut self, query: &E::Query) -> Result<(), StoreError> {
        self.begin();

        let error = match self.remote.fetch_all(query).await {
            Ok(items) => {
                debug!("Fetched {} {}", items.len(), E::PLURAL);
                self.state.items = items;
                if self.state.is_offline {
                    info!("Connection restored, {} store is back online", E::PLURAL);
                    self.state.is_offline = false;
                }
                return self.finish(Ok(()));
            }
            Err(error) => error,
        };

        let outcome = match self.local.as_deref() {
            Some(local) if error.is_connectivity() => {
                warn!(
                    "Network error detected, switching {} store to offline mode with sample data",
                    E::PLURAL
                );
                local.fetch_all(query).await.map(|items| {
                    self.state.items = items;
                    self.state.is_offline = true;
                    self.state.error = Some(StoreError::connectivity(OFFLINE_ADVISORY));
                })
            }
            Some(_) => Err(error),
            None => {
                self.state.items.clear();
                Err(error)
            }
        };

        self.finish(outcome)
    }

    /// Load one entity into the selected slot
    pub async fn fetch_by_id(&mut self, id: &str) -> Result<E, StoreError> {
        self.begin();
        let result = self.backend().fetch_by_id(id).await;
        if let Ok(ref entity) = result {
            self.state.selected = Some(entity.clone());
        }
        self.finish(result)
    }

    /// Validate locally, then create and append to the collection
    pub async fn create(&mut self, draft: E::Draft) -> Result<E, StoreError> {
        self.begin();
        if let Err(error) = E::validate_draft(&draft) {
            return self.finish(Err(error));
        }

        let result = self.backend().create(draft).await;
        if let Ok(ref entity) = result {
            self.state.items.push(entity.clone());
        }
        self.finish(result)
    }

    /// Apply `patch` and refresh every local copy of the entity
    pub async fn update(&mut self, id: &str, patch: E::Patch) -> Result<E, StoreError> {
        self.begin();
        let result = self.backend().update(&self.state, id, patch).await;

        let result = result.and_then(|updated| match updated {
            Updated::Replaced(entity) => {
                self.state.replace(id, &entity);
                Ok(entity)
            }
            Updated::Merged(patch) => {
                self.state.merge(id, &patch);
                self.state
                    .lookup(id)
                    .cloned()
                    .ok_or_else(|| StoreError::not_found(format!("{} not found", E::title())))
            }
        });

        self.finish(result)
    }

    /// Delete and drop the entity from the collection and selection
    pub async fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.begin();
        let result = self.backend().delete(&self.state, id).await;
        if result.is_ok() {
            self.state.remove(id);
        }
        self.finish(result)
    }

    /// Backend serving everything except `fetch_all`
    fn backend(&self) -> &B {
        match (self.state.is_offline, self.local.as_deref()) {
            (true, Some(local)) => local,
            _ => &*self.remote,
        }
    }

    fn begin(&mut self) {
        self.state.is_loading = true;
        self.state.error = None;
        self.publish();
    }

    fn finish<T>(&mut self, result: Result<T, StoreError>) -> Result<T, StoreError> {
        self.state.is_loading = false;
        if let Err(ref error) = result {
            warn!("{} store error: {}", E::title(), error);
            self.state.error = Some(error.clone());
        }
        self.publish();
        result
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}
